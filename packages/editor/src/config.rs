use serde::{Deserialize, Serialize};

/// Editor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    #[serde(default)]
    pub events: EventNames,
}

/// Names of the lifecycle events the editor emits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventNames {
    /// Emitted before any page is serialized
    pub publish_before: String,

    /// Emitted once every page is serialized
    pub publish_start: String,

    /// Emitted when the publish cycle is over
    pub publish_stop: String,

    /// Page added, removed or renamed
    pub page: String,

    /// Selection changed
    pub selected: String,

    /// A component was edited
    pub update: String,
}

impl Default for EventNames {
    fn default() -> Self {
        Self {
            publish_before: "publish:before".to_string(),
            publish_start: "publish:start".to_string(),
            publish_stop: "publish:stop".to_string(),
            page: "page".to_string(),
            selected: "component:selected".to_string(),
            update: "component:update".to_string(),
        }
    }
}

impl EventNames {
    /// Events after which trait views are rendered again
    pub fn refreshes_traits(&self, event: &str) -> bool {
        event == self.page || event == self.selected || event == self.update
    }
}
