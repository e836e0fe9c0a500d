//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Top line with attribution and result counts
//! - `Loader`: Spinner shown while the loader debounce says so
//! - `ErrorMessage`: Replaces the grid when the fetch failed
//! - `Pagination`: Page selector above the grid
//! - `ToastStack`: Transient notifications
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `SearchBar`: Text field, emits the raw query on Enter
//! - `MovieGrid`: Card grid with keyboard selection
//! - `MovieModal`: Detail overlay for one movie
//!
//! Components receive external data as props, never by reaching into the
//! global `App`. Each file holds the component's state type, event type,
//! rendering, event handling and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs
//! ├── search_bar.rs
//! ├── loader.rs
//! ├── pagination.rs
//! ├── movie_grid.rs
//! ├── movie_modal.rs
//! ├── error_message.rs
//! ├── toast.rs
//! └── text.rs           (width-aware truncation)
//! ```

pub mod error_message;
pub mod loader;
pub mod movie_grid;
pub mod movie_modal;
pub mod pagination;
pub mod search_bar;
pub mod text;
pub mod title_bar;
pub mod toast;

pub use error_message::ErrorMessage;
pub use loader::Loader;
pub use movie_grid::{GridEvent, MovieGrid, MovieGridState};
pub use movie_modal::{ModalEvent, MovieModal, MovieModalState};
pub use pagination::Pagination;
pub use search_bar::{SearchBar, SearchEvent};
pub use title_bar::{ResultSummary, TitleBar};
pub use toast::ToastStack;
