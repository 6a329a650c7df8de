//! Home Event Model
//!
//! The landing-page rail reuses the event card shape but is a separate
//! collection with its own independent ordering.

use serde::{Deserialize, Serialize};

use super::event::{Event, EventCreate, EventUpdate};
use crate::ordering::OrderedEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomeEvent(pub Event);

impl OrderedEntity for HomeEvent {
    const TABLE: &'static str = "home_event";
}

pub type HomeEventCreate = EventCreate;
pub type HomeEventUpdate = EventUpdate;
