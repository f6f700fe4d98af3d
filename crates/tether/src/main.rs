//! Demo driver: load a scene, bind its elements, pump frames, report styles.
//!
//! Usage: `tether [scene.json]`. Without an argument a built-in scene runs.
//! Output goes through the logger; set `RUST_LOG=info` (or `debug` with
//! `TETHER_TRACE_WRITES=1`) to see it.

mod scene;

use std::collections::BTreeMap;
use std::rc::Rc;
use std::{env, fs};

use alignment::POSITION_PROPERTIES;
use anyhow::{Context as _, Error, anyhow};
use attach::{AttachBinding, AttachOptions};
use host::{ElementHandle as _, Host};
use log::info;

use crate::scene::Scene;

const DEFAULT_SCENE: &str = include_str!("../assets/scene.json");

fn main() -> Result<(), Error> {
    env_logger::init();

    let scene_text = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => DEFAULT_SCENE.to_owned(),
    };
    let loaded: Scene = serde_json::from_str(&scene_text).context("scene is not valid JSON")?;

    let scene_host = scene::build_host(&loaded);
    let host_ref: Rc<dyn Host> = Rc::new(scene_host.clone());

    let mut bindings: Vec<(String, AttachBinding)> = Vec::new();
    for description in &loaded.bindings {
        let element = scene_host
            .query_selector(&description.element)
            .ok_or_else(|| anyhow!("binding element not found: {:?}", description.element))?;
        let mut options = AttachOptions::new(description.anchor.clone());
        if let Some(parent) = &description.align_parent {
            options = options.align_parent(parent.clone());
        }
        if let Some(spec) = &description.align {
            options = options.align_fixed(spec.clone());
        }
        let binding = AttachBinding::bind(Rc::clone(&host_ref), element, options)?;
        info!(
            "bound {:?} to {:?} ({})",
            description.element,
            description.anchor,
            if binding.is_frame_driven() {
                "frame-driven"
            } else {
                "event-driven"
            }
        );
        bindings.push((description.element.clone(), binding));
    }

    for frame in 0..loaded.frames {
        if let Some(drift) = &loaded.drift {
            scene::apply_drift(&scene_host, drift);
        }
        scene_host.run_frame();
        scene_host.check_watches();
        info!("frame {frame} delivered");
    }

    for (selector, binding) in &bindings {
        let element = scene_host
            .find(selector)
            .ok_or_else(|| anyhow!("bound element disappeared: {selector:?}"))?;
        let style: BTreeMap<&str, String> = POSITION_PROPERTIES
            .iter()
            .filter_map(|property| {
                element
                    .style_property(property)
                    .map(|value| (*property, value))
            })
            .collect();
        let stats = binding.stats();
        info!(
            "{selector} {} (refreshes={} writes={} skipped={})",
            serde_json::to_string(&style)?,
            stats.refreshes(),
            stats.writes(),
            stats.skipped_writes(),
        );
    }

    Ok(())
}
