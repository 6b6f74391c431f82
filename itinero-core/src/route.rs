use crate::model::NavigationPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    PlanTrip,
    Itinerary,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::PlanTrip => "/",
            Route::Itinerary => "/itinerary",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::PlanTrip),
            "/itinerary" => Some(Route::Itinerary),
            _ => None,
        }
    }
}

/// One transition between screens, optionally carrying state for the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    route: Route,
    payload: Option<NavigationPayload>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self { route, payload: None }
    }

    pub fn with_payload(route: Route, payload: NavigationPayload) -> Self {
        Self { route, payload: Some(payload) }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// The payload is handed over once; later calls see nothing.
    pub fn take_payload(&mut self) -> Option<NavigationPayload> {
        self.payload.take()
    }
}
