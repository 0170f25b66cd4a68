//! In-page shell: decides whether to attach, shows the floating toolbar,
//! runs the actions it triggers and reports the result as a notice.

pub mod activation;
pub mod notice;
pub mod runner;
pub mod shell;
pub mod toolbar;

pub use activation::should_activate;
pub use notice::{Notice, NoticeBoard, NoticePhase};
pub use runner::{Action, ActionOutcome, ActionRunner};
pub use shell::Shell;
pub use toolbar::{Button, PointerTarget, Toolbar};
