use serde::Serialize;

use crate::catalog::LOCATIONS;
use crate::engine::pricing::compute_route;
use crate::models::location::{Location, LocationCategory};
use crate::models::route::Route;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    SelectOrigin,
    SelectDestination,
    Confirm,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Origins must be pickup points.
    NotAPickupPoint,
    SameAsOrigin,
    /// Both ends are chosen; reset or confirm first.
    SelectionComplete,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::NotAPickupPoint => "origin must be a pickup location",
            Rejection::SameAsOrigin => "destination must differ from the origin",
            Rejection::SelectionComplete => "route already chosen; reset to change it",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    OriginChosen,
    DestinationChosen(Route),
    Rejected(Rejection),
}

#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub location: Location,
    pub selectable: bool,
}

/// The three-step origin/destination wizard for one booking session.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingFlow {
    step: BookingStep,
    origin: Option<Location>,
    destination: Option<Location>,
    route: Option<Route>,
    query: String,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            step: BookingStep::SelectOrigin,
            origin: None,
            destination: None,
            route: None,
            query: String::new(),
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn origin(&self) -> Option<&Location> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&Location> {
        self.destination.as_ref()
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Locations offered for the current step, narrowed by the search query.
    pub fn candidates(&self) -> Vec<Candidate> {
        match self.step {
            BookingStep::SelectOrigin => LOCATIONS
                .iter()
                .filter(|location| location.category == LocationCategory::Pickup)
                .filter(|location| location.matches(&self.query))
                .map(|location| Candidate {
                    location: location.clone(),
                    selectable: true,
                })
                .collect(),
            BookingStep::SelectDestination => LOCATIONS
                .iter()
                .filter(|location| location.matches(&self.query))
                .map(|location| Candidate {
                    location: location.clone(),
                    selectable: !self.is_origin(location),
                })
                .collect(),
            BookingStep::Confirm => Vec::new(),
        }
    }

    /// Applies a tap on `location`. A rejected selection leaves the flow untouched.
    pub fn select(&mut self, location: &Location) -> SelectOutcome {
        match self.step {
            BookingStep::SelectOrigin => {
                if location.category != LocationCategory::Pickup {
                    return SelectOutcome::Rejected(Rejection::NotAPickupPoint);
                }

                self.origin = Some(location.clone());
                self.step = BookingStep::SelectDestination;
                self.query.clear();
                SelectOutcome::OriginChosen
            }
            BookingStep::SelectDestination => {
                let Some(origin) = self.origin.as_ref() else {
                    return SelectOutcome::Rejected(Rejection::NotAPickupPoint);
                };
                if origin.id == location.id {
                    return SelectOutcome::Rejected(Rejection::SameAsOrigin);
                }

                let route = compute_route(origin, location);
                self.destination = Some(location.clone());
                self.route = Some(route.clone());
                self.step = BookingStep::Confirm;
                self.query.clear();
                SelectOutcome::DestinationChosen(route)
            }
            BookingStep::Confirm => SelectOutcome::Rejected(Rejection::SelectionComplete),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Hands the chosen route to the payment stage. `None` until both ends are set.
    pub fn confirm(&self) -> Option<Route> {
        match self.step {
            BookingStep::Confirm => self.route.clone(),
            _ => None,
        }
    }

    fn is_origin(&self, location: &Location) -> bool {
        self.origin
            .as_ref()
            .is_some_and(|origin| origin.id == location.id)
    }
}
