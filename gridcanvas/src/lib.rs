pub mod buffer;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::{Buffer, Cell};
pub use event::{EventKind, HostEvent, Key, Modifiers, MouseButton};
pub use geometry::Rect;
pub use grid::{
    CanvasGrid, CellRange, CellRect, CompactSelection, CurrentCell, GridCell, GridColumn,
    GridHit, GridInteraction, GridProps, GridSelection, GroupDetails, GroupHeader, Item, Viewport,
    CELL_WIDTH_PX,
};
pub use terminal::Terminal;
pub use types::*;
