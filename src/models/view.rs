use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Orders,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Dashboard",
            View::Orders => "Orders",
        }
    }

    pub fn toggle(self) -> View {
        match self {
            View::Home => View::Orders,
            View::Orders => View::Home,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Orders => "orders",
        }
    }
}
