//! egui front end: the map, the sidebar cards, the entry form and the
//! transient banner.

pub mod banner;
pub mod form;
pub mod map;
pub mod sidebar;
pub mod theme;

pub use banner::TimedBanner;
pub use form::{FormEvent, WorkoutFormPanel};
pub use map::{MarkerId, PlotMap, ViewRequest};
pub use sidebar::{CardAction, CardId, CardList, WorkoutCard};
pub use theme::Theme;
