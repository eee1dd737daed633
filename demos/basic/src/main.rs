use std::collections::HashMap;
use std::sync::Arc;

use log::LevelFilter;
use tailor::{install, Class, SharedStyleSource, Styleable, WILL_ATTACH};

#[derive(Clone, Debug)]
struct Palette {
    foreground: &'static str,
    background: &'static str,
}

#[derive(Debug)]
struct Widget {
    name: &'static str,
    style_class: &'static str,
    participates: bool,
    styles_applied: bool,
    explicit: Option<Palette>,
    palette: Option<Palette>,
}

impl Widget {
    fn new(name: &'static str, style_class: &'static str) -> Self {
        Widget {
            name,
            style_class,
            participates: true,
            styles_applied: false,
            explicit: None,
            palette: None,
        }
    }
}

impl Styleable for Widget {
    type Style = Palette;

    fn participates_in_runtime_styling(&self) -> bool {
        self.participates
    }

    fn styles_applied(&self) -> bool {
        self.styles_applied
    }

    fn set_styles_applied(&mut self, applied: bool) {
        self.styles_applied = applied;
    }

    fn explicit_style(&self) -> Option<Palette> {
        self.explicit.clone()
    }

    fn apply_style(&mut self, style: Palette) {
        self.palette = Some(style);
    }
}

struct StyleMap {
    shared: HashMap<&'static str, Palette>,
}

impl SharedStyleSource<Widget> for StyleMap {
    fn apply_shared(&self, view: &mut Widget) -> bool {
        let Some(palette) = self.shared.get(view.style_class) else {
            return false;
        };

        view.palette = Some(palette.clone());
        true
    }
}

fn main() {
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let widget: Arc<Class<Widget>> = Class::root("widget");
    widget.define_instance(WILL_ATTACH, |_, view: &mut Widget, new_parent| {
        let parent = new_parent.map_or("nothing", |p| p.name);
        log::info!("{} attaching to {parent}", view.name);
    });
    let button = Class::subclass("button", &widget);

    let shared = HashMap::from([
        (
            "button",
            Palette {
                foreground: "#1a1a1a",
                background: "#ffcc00",
            },
        ),
        (
            "label",
            Palette {
                foreground: "#e0e0e0",
                background: "#1a1a1a",
            },
        ),
    ]);
    install(&widget, Arc::new(StyleMap { shared }));

    let window = Widget::new("window", "window");

    let mut ok = Widget::new("ok-button", "button");
    button.send(&mut ok, WILL_ATTACH, Some(&window));
    button.send(&mut ok, WILL_ATTACH, Some(&window));
    log::info!("{}: applied={} palette={:?}", ok.name, ok.styles_applied, ok.palette);

    let mut title = Widget::new("title", "label");
    title.explicit = Some(Palette {
        foreground: "#ff2a6d",
        background: "#05060f",
    });
    widget.send(&mut title, WILL_ATTACH, Some(&window));
    log::info!(
        "{}: applied={} palette={:?} (explicit wins)",
        title.name,
        title.styles_applied,
        title.palette
    );

    let mut chrome = Widget::new("chrome", "titlebar");
    chrome.participates = false;
    widget.send(&mut chrome, WILL_ATTACH, Some(&window));
    log::info!(
        "{}: applied={} palette={:?}",
        chrome.name,
        chrome.styles_applied,
        chrome.palette
    );
}
