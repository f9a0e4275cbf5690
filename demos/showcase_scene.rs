//! Drives a showcase-style scroll scene against an in-memory host and
//! prints what the orchestrator does frame by frame.
//!
//! Run with: `cargo run --example showcase_scene`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glissade::{
    card_rise, fade_up, mount_section, CounterFrame, CounterSink, CounterSpec, ElementRef,
    InputDelta, Orchestrator, Prop, Rect, ScrollSurface, SectionBuilder, SectionElements,
    SharedOrchestrator, SmoothedConfig, SmoothedScrollSource, ViewElement, ViewportMetrics,
};

struct DemoElement {
    name: &'static str,
    document_top: f64,
    scroll: Rc<Cell<f64>>,
    opacity: Cell<f64>,
}

impl DemoElement {
    fn new(name: &'static str, document_top: f64, scroll: &Rc<Cell<f64>>) -> Rc<Self> {
        Rc::new(Self {
            name,
            document_top,
            scroll: Rc::clone(scroll),
            opacity: Cell::new(0.0),
        })
    }

    fn as_element(self: &Rc<Self>) -> ElementRef {
        Rc::clone(self) as ElementRef
    }
}

impl ViewElement for DemoElement {
    fn bounds(&self) -> Option<Rect> {
        let top = self.document_top - self.scroll.get();
        Some(Rect::new(0.0, top, 1280.0, top + 400.0))
    }

    fn set_prop(&self, prop: Prop, value: f64) {
        if prop == Prop::Opacity {
            self.opacity.set(value);
        }
    }
}

struct DemoSurface {
    scroll: Rc<Cell<f64>>,
}

impl ScrollSurface for DemoSurface {
    fn metrics(&self) -> ViewportMetrics {
        ViewportMetrics {
            height: 720.0,
            scroll_range: 3280.0,
        }
    }

    fn raw_position(&self) -> f64 {
        self.scroll.get()
    }

    fn apply_position(&self, position: f64) {
        self.scroll.set(position);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let scroll = Rc::new(Cell::new(0.0));
    let surface = DemoSurface {
        scroll: Rc::clone(&scroll),
    };

    let shared = SharedOrchestrator::new(Orchestrator::new(Box::new(
        SmoothedScrollSource::new(SmoothedConfig::default()),
    )));

    let hero = DemoElement::new("hero", 200.0, &scroll);
    let stats_root = DemoElement::new("stats", 1100.0, &scroll);
    let cards: Vec<Rc<DemoElement>> = ["top-speed", "zero-to-100", "horsepower", "torque"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| DemoElement::new(name, 1200.0 + 60.0 * i as f64, &scroll))
        .collect();

    shared.with(|orch| {
        orch.play(&fade_up(1000.0, 24.0).with_delay(500.0), &hero.as_element())
            .expect("hero reveal")
    });

    let readout: CounterSink = Rc::new(RefCell::new(|frame: &CounterFrame| {
        println!("    top speed: {} km/h", frame.text);
    }));
    let section = SectionBuilder::new("performance")
        .threshold(0.3)
        .stagger_step_ms(100.0)
        .entrance(card_rise())
        .counter(CounterSpec::new(341.0, 2000.0).with_unit("km/h"))
        .build()
        .expect("section spec");
    let _mount = shared.with(|orch| {
        mount_section(
            orch,
            &section,
            &SectionElements {
                root: stats_root.as_element(),
                items: cards.iter().map(DemoElement::as_element).collect(),
            },
            &[readout],
        )
        .expect("mount performance section")
    });

    let mut now = 0.0;
    let mut frame = |shared: &SharedOrchestrator, label: &str, frames: usize| {
        for _ in 0..frames {
            shared.tick(now, &surface);
            now += 16.0;
        }
        let state = shared.state();
        println!(
            "[{label}] scroll={:7.1}px progress={:4.2} hero α={:.2} cards α={:.2}/{:.2}/{:.2}/{:.2}",
            state.position,
            state.progress,
            hero.opacity.get(),
            cards[0].opacity.get(),
            cards[1].opacity.get(),
            cards[2].opacity.get(),
            cards[3].opacity.get(),
        );
    };

    frame(&shared, "hero reveal", 120);

    println!("-- wheel down one viewport --");
    shared.push_input(InputDelta::Wheel(900.0));
    frame(&shared, "gliding", 30);
    frame(&shared, "stats firing", 60);
    frame(&shared, "settled", 210);

    for card in &cards {
        println!("card {:<12} opacity {:.2}", card.name, card.opacity.get());
    }
}
