// Components module - reusable UI building blocks
//
// - Title bar: app name, stream URL, connection badge
// - Controls bar: key hints gated on connection state
// - Logs panel: the operator log
// - Diagnostics panel: the console's own tracing output
// - Status bar: uptime, counts, pending commands
// - Toast: transient confirmation overlay

pub mod controls_bar;
pub mod diagnostics_panel;
pub mod logs_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;
