#![forbid(unsafe_code)]

pub mod app;
pub mod canvas;
pub mod content;
pub mod core;
pub mod ease;
pub mod error;
pub mod eval;
pub mod events;
pub mod frames;
pub mod guide;
pub mod keyboard;
pub mod layout;
pub mod loading;
pub mod modal;
pub mod nav;
pub mod page;
pub mod particles;
pub mod present;
pub mod scroll;
pub mod sections;
pub mod state;
pub mod timeline;

pub use app::{App, AppSignal, Snapshot};
pub use canvas::{Backdrop, Surface};
pub use core::{Point, Rect, Rgba8Premul, Vec2, Viewport};
pub use ease::Ease;
pub use error::{StradaError, StradaResult};
pub use eval::{Choreographer, EvaluatedPage, VisualState};
pub use events::{Emitter, SubscriptionId};
pub use frames::{FrameEvent, PreparedFrame, Preloader, frame_index_for};
pub use keyboard::{Key, KeyContext, NavCommand};
pub use layout::{Layout, SectionLayout, solve_layout};
pub use loading::{LoadingPhase, LoadingScreen};
pub use modal::{ModalController, ModalPhase};
pub use nav::NavState;
pub use page::{FrameSequence, Page, Section, showcase_page};
pub use scroll::{ScrollEngine, ScrollEvent, ScrollOptions};
pub use sections::SectionRegistry;
pub use state::AppState;
pub use timeline::{Property, Set, Timeline, TimelineBuilder, Trigger, Tween};
