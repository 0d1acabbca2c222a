use serde::{Deserialize, Serialize};

use crate::model::config::{ThemeName, UiConfig};
use crate::model::query::{ListQuery, Sort, StatusFilter};

/// The user-selected view settings: what to list and how to show it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub filter: StatusFilter,
    pub sort: Sort,
    /// Search term exactly as typed
    pub search: String,
    pub theme: ThemeName,
}

impl ViewState {
    pub fn from_config(ui: &UiConfig) -> Self {
        ViewState {
            filter: ui.filter,
            sort: ui.sort,
            search: String::new(),
            theme: ui.theme,
        }
    }

    /// The list call matching these settings
    pub fn query(&self) -> ListQuery {
        ListQuery {
            sort: self.sort,
            status: self.filter,
            search: self.search.clone(),
        }
    }
}
