//! Named routes and the back stack behind screen switching.

use shared::domain::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Overview,
    AllItems,
    Settings,
    Notifications,
    AddItem,
    FoodDetails(ItemId),
    EditItem(ItemId),
}

impl Route {
    pub const START: Route = Route::Overview;

    pub fn path(&self) -> String {
        match self {
            Route::Overview => "overview".to_string(),
            Route::AllItems => "all_items".to_string(),
            Route::Settings => "settings".to_string(),
            Route::Notifications => "notifications".to_string(),
            Route::AddItem => "add_item".to_string(),
            Route::FoodDetails(id) => format!("food_details/{id}"),
            Route::EditItem(id) => format!("edit_item/{id}"),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "overview" => return Some(Route::Overview),
            "all_items" => return Some(Route::AllItems),
            "settings" => return Some(Route::Settings),
            "notifications" => return Some(Route::Notifications),
            "add_item" => return Some(Route::AddItem),
            _ => {}
        }

        let (prefix, id) = path.split_once('/')?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        match prefix {
            "food_details" => Some(Route::FoodDetails(ItemId::from(id))),
            "edit_item" => Some(Route::EditItem(ItemId::from(id))),
            _ => None,
        }
    }

    /// Routes reachable from the bottom navigation bar.
    pub fn is_tab(&self) -> bool {
        matches!(self, Route::Overview | Route::AllItems | Route::Settings)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Overview => "Overview",
            Route::AllItems => "All Items",
            Route::Settings => "Settings",
            Route::Notifications => "Notifications",
            Route::AddItem => "Add Item",
            Route::FoodDetails(_) => "Food Details",
            Route::EditItem(_) => "Edit Item",
        }
    }
}

pub const TABS: [Route; 3] = [Route::Overview, Route::AllItems, Route::Settings];

#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            stack: vec![Route::START],
        }
    }
}

impl Navigator {
    pub fn current(&self) -> &Route {
        // The start destination is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn can_pop(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(route = %route.path(), "navigate");
        self.stack.push(route);
    }

    /// Bottom-bar navigation: unwinds to the start destination, then pushes
    /// the tab unless it is already on top.
    pub fn navigate_tab(&mut self, route: Route) {
        self.stack.truncate(1);
        if self.current() != &route {
            self.stack.push(route);
        }
    }

    pub fn pop_back(&mut self) -> bool {
        if self.can_pop() {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Tab highlighted in the bottom bar for the current back stack.
    pub fn selected_tab(&self) -> Route {
        self.stack
            .iter()
            .rev()
            .find(|route| route.is_tab())
            .cloned()
            .unwrap_or(Route::START)
    }
}
