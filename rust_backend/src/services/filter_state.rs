//! Shared filter state and its change notification.
//!
//! The manager owns the only mutable state of the dashboard. Every accepted
//! mutation replaces the current [`FilterState`] with a fresh `Arc` snapshot
//! and calls each registered listener synchronously, in registration order.
//! Rejected mutations leave the state untouched and notify nobody.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::core::domain::YearRange;
use crate::error::FilterError;

/// Limits enforced on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterLimits {
    #[serde(default = "default_max_selection")]
    pub max_selection: usize,
    #[serde(default = "default_min_year_span")]
    pub min_year_span: i32,
}

fn default_max_selection() -> usize {
    5
}

fn default_min_year_span() -> i32 {
    5
}

impl Default for FilterLimits {
    fn default() -> Self {
        Self {
            max_selection: default_max_selection(),
            min_year_span: default_min_year_span(),
        }
    }
}

/// Immutable snapshot of the current selection and year range.
///
/// `selected` keeps selection order, which is also the color order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected: Vec<String>,
    pub year_range: YearRange,
}

impl FilterState {
    pub fn is_selected(&self, category: &str) -> bool {
        self.selected.iter().any(|c| c == category)
    }
}

/// Handle returned by [`FilterStateManager::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Arc<FilterState>)>;

/// Remove duplicates, keeping the first occurrence.
fn dedup_in_order(categories: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(categories.len());
    for c in categories {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

/// Widen `(min, max)` to at least `span` years by moving the bound the user
/// did not drag. If only `min` moved, `min` is pushed down; otherwise `max`
/// is pushed up.
fn clamp_year_range(
    current: YearRange,
    min: i32,
    max: i32,
    span: i32,
) -> Result<YearRange, FilterError> {
    if i64::from(max) - i64::from(min) >= i64::from(span) {
        return Ok(YearRange { min, max });
    }

    let only_min_moved = min != current.min && max == current.max;
    let clamped = if only_min_moved {
        max.checked_sub(span).map(|m| YearRange { min: m, max })
    } else {
        min.checked_add(span).map(|m| YearRange { min, max: m })
    };
    clamped.ok_or(FilterError::InvalidYearRange { min, max })
}

/// Owner of the filter state.
///
/// # Examples
///
/// ```
/// use movie_dash::core::domain::YearRange;
/// use movie_dash::services::filter_state::{FilterLimits, FilterStateManager};
///
/// let mut filters = FilterStateManager::new(
///     vec!["Drama".to_string()],
///     YearRange::new(1970, 2016).unwrap(),
///     FilterLimits::default(),
/// ).unwrap();
///
/// let state = filters.set_year_range(2010, 2013).unwrap();
/// assert_eq!((state.year_range.min, state.year_range.max), (2010, 2015));
/// ```
pub struct FilterStateManager {
    state: Arc<FilterState>,
    limits: FilterLimits,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for FilterStateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterStateManager")
            .field("state", &self.state)
            .field("limits", &self.limits)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FilterStateManager {
    /// Create a manager with an initial selection and year range.
    ///
    /// The initial values go through the same checks as later mutations.
    pub fn new(
        selection: Vec<String>,
        year_range: YearRange,
        limits: FilterLimits,
    ) -> Result<Self, FilterError> {
        let selected = dedup_in_order(selection);
        if selected.len() > limits.max_selection {
            return Err(FilterError::SelectionLimitExceeded {
                limit: limits.max_selection,
                attempted: selected.len(),
            });
        }
        let year_range = clamp_year_range(
            year_range,
            year_range.min,
            year_range.max,
            limits.min_year_span,
        )?;

        Ok(Self {
            state: Arc::new(FilterState {
                selected,
                year_range,
            }),
            limits,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    /// Current snapshot.
    pub fn state(&self) -> Arc<FilterState> {
        Arc::clone(&self.state)
    }

    pub fn limits(&self) -> FilterLimits {
        self.limits
    }

    /// Counter text for the selection widget, e.g. "3 of 5 selected".
    pub fn selection_label(&self) -> String {
        format!(
            "{} of {} selected",
            self.state.selected.len(),
            self.limits.max_selection
        )
    }

    /// Register a listener called after every accepted mutation.
    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Arc<FilterState>) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replace the selection.
    ///
    /// Duplicates are dropped. More than `max_selection` distinct values is
    /// rejected with [`FilterError::SelectionLimitExceeded`], never truncated.
    pub fn set_selection(&mut self, categories: Vec<String>) -> Result<Arc<FilterState>, FilterError> {
        let selected = dedup_in_order(categories);
        self.check_selection_len(selected.len())?;
        Ok(self.publish(FilterState {
            selected,
            year_range: self.state.year_range,
        }))
    }

    /// Check or uncheck one category. Checking appends it to the selection.
    pub fn toggle(&mut self, category: &str) -> Result<Arc<FilterState>, FilterError> {
        let mut selected = self.state.selected.clone();
        if let Some(pos) = selected.iter().position(|c| c == category) {
            selected.remove(pos);
        } else {
            self.check_selection_len(selected.len() + 1)?;
            selected.push(category.to_string());
        }
        Ok(self.publish(FilterState {
            selected,
            year_range: self.state.year_range,
        }))
    }

    /// Uncheck every category.
    pub fn clear_selection(&mut self) -> Arc<FilterState> {
        self.publish(FilterState {
            selected: Vec::new(),
            year_range: self.state.year_range,
        })
    }

    /// Set both year bounds, clamping to the minimum span.
    pub fn set_year_range(&mut self, min: i32, max: i32) -> Result<Arc<FilterState>, FilterError> {
        let year_range = clamp_year_range(self.state.year_range, min, max, self.limits.min_year_span)
            .inspect_err(|e| log::warn!("Rejected year range {}..={}: {}", min, max, e))?;

        if year_range.min != min || year_range.max != max {
            log::debug!("Clamped year range {}..={} to {}", min, max, year_range);
        }

        Ok(self.publish(FilterState {
            selected: self.state.selected.clone(),
            year_range,
        }))
    }

    /// Drag the lower handle.
    pub fn set_min_year(&mut self, min: i32) -> Result<Arc<FilterState>, FilterError> {
        let max = self.state.year_range.max;
        self.set_year_range(min, max)
    }

    /// Drag the upper handle.
    pub fn set_max_year(&mut self, max: i32) -> Result<Arc<FilterState>, FilterError> {
        let min = self.state.year_range.min;
        self.set_year_range(min, max)
    }

    fn check_selection_len(&self, attempted: usize) -> Result<(), FilterError> {
        if attempted > self.limits.max_selection {
            log::warn!(
                "Rejected selection of {} categories (limit {})",
                attempted,
                self.limits.max_selection
            );
            return Err(FilterError::SelectionLimitExceeded {
                limit: self.limits.max_selection,
                attempted,
            });
        }
        Ok(())
    }

    fn publish(&mut self, next: FilterState) -> Arc<FilterState> {
        self.state = Arc::new(next);
        log::debug!(
            "Filter state: [{}] {} ({} listeners)",
            self.state.selected.join(", "),
            self.state.year_range,
            self.listeners.len()
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
        Arc::clone(&self.state)
    }
}
