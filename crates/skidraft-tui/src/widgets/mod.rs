// TUI widget modules for each dashboard panel.

pub mod cards;
pub mod confirm;
pub mod draft_order;
pub mod help_bar;
pub mod leaderboard;
pub mod notice_bar;
pub mod player_form;
pub mod status_bar;
