//! UI-Komponenten: Toolbar, Seitenleiste, Routen-Panel, Kartenansicht,
//! Status-Bar. Alle Render-Funktionen geben erzeugte `AppIntent`s zurueck.

pub mod map_view;
pub mod route_panel;
pub mod sidebar;
pub mod status;
pub mod toolbar;

pub use map_view::render_map_view;
pub use route_panel::render_route_panel;
pub use sidebar::render_sidebar;
pub use status::render_status_bar;
pub use toolbar::render_toolbar;
