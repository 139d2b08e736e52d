//! Framework-neutral data grid engine with multi-level collapsible column
//! groups.
//!
//! A [`GridEngine`] renders a [`gridcanvas::CanvasGrid`] onto a host element
//! supplied through a [`FrameworkAdapter`]. Columns carry a group path; groups
//! can be collapsed into narrow bands and are reopened by clicking them or by
//! selecting a cell inside them.

pub mod adapter;
pub mod column;
pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod grouping;
pub mod layout;
pub mod lifecycle;
pub mod state;

pub use adapter::{FontSpec, FrameworkAdapter, HeadlessAdapter, HostElement, TerminalAdapter, TerminalHost, TextMetrics};
pub use column::ColumnDef;
pub use config::{ConfigPatch, DataMatrix, GridCallbacks, GridEngineConfig, GridOptions};
pub use engine::{DataGrid, GridEngine};
pub use error::{EngineError, LayoutError};
pub use factory::{Framework, GridFactory};
pub use layout::GridLayout;
pub use state::State;

pub mod prelude {
    pub use crate::adapter::{FontSpec, FrameworkAdapter, HeadlessAdapter, HostElement, TerminalAdapter, TerminalHost};
    pub use crate::column::ColumnDef;
    pub use crate::config::{ConfigPatch, DataMatrix, GridEngineConfig, GridOptions};
    pub use crate::engine::{DataGrid, GridEngine};
    pub use crate::error::{EngineError, LayoutError};
    pub use crate::factory::{Framework, GridFactory};
    pub use crate::grouping::{CollapseSet, GroupPath, Span};
    pub use crate::layout::GridLayout;
    pub use crate::state::State;

    pub use gridcanvas::{GridCell, GridSelection, GroupDetails, HostEvent, Key, Theme, ThemeOverride, Viewport};
}
