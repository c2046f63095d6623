use gtk4::prelude::*;
use gtk4::Application;

use crate::config::GalleryConfig;
use crate::ui::MainWindow;

const APP_ID: &str = "com.masonry.Gallery";

pub struct GalleryApp {
    app: Application,
}

impl GalleryApp {
    pub fn new(config: GalleryConfig) -> Self {
        let app = Application::builder().application_id(APP_ID).build();

        app.connect_activate(move |app| Self::on_activate(app, &config));

        Self { app }
    }

    pub fn run(&self) -> i32 {
        self.app.run().into()
    }

    fn on_activate(app: &Application, config: &GalleryConfig) {
        if let Some(window) = app.active_window() {
            window.present();
            return;
        }
        let window = MainWindow::new(app, config);
        window.present();
    }
}
