pub mod info_dialog;
pub mod map_view;
pub mod model_dialog;
pub mod site_list_dialog;
pub mod site_panel;
