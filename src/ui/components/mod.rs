pub mod connection_panel;
pub mod identity_prompt;
pub mod input_bar;
pub mod message_list;
