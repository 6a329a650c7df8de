//! Data Models
//!
//! One file per entity family, each with its record struct plus Create and
//! Update DTOs. `sort_order`, `is_active` and the timestamps are
//! server-managed: the Update DTOs deliberately have no such fields, and the
//! Create DTOs at most carry an initial `is_active`.

pub mod serde_thing;

mod admin;
mod award;
mod blog;
mod event;
mod hero;
mod home_event;
mod image_ref;
mod page_event;
mod season;
mod sponsor;
mod timeline;

pub use admin::{Admin, AdminId, AdminInfo};
pub use award::{Award, AwardCreate, AwardIcon, AwardId, AwardType, AwardUpdate};
pub use blog::{Blog, BlogCreate, BlogId, BlogStatus, BlogUpdate};
pub use event::{Event, EventCreate, EventId, EventUpdate};
pub use hero::{
    ButtonAction, ButtonActionType, HeroButton, HeroContent, HeroContentCreate, HeroContentId,
    HeroContentUpdate, HeroMediaType, HeroText,
};
pub use home_event::{HomeEvent, HomeEventCreate, HomeEventUpdate};
pub use image_ref::{ImageRef, MediaRef, StyledText};
pub use page_event::{
    EventLocation, EventTime, PageEvent, PageEventCreate, PageEventId, PageEventUpdate,
};
pub use season::{
    BoardMember, BoardMemberCreate, BoardMemberUpdate, Highlight, HighlightCreate,
    HighlightUpdate, Season, SeasonCreate, SeasonId, SeasonUpdate,
};
pub use sponsor::{Sponsor, SponsorCreate, SponsorId, SponsorKind, SponsorUpdate, SponsorsView};
pub use timeline::{
    PhasePosition, TimelinePhase, TimelinePhaseCreate, TimelinePhaseId, TimelinePhaseUpdate,
    TimelineSection, TimelineSectionCreate, TimelineSectionId, TimelineSectionUpdate, TimelineView,
};
