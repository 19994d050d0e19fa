//! End-to-end flows over the host-side state machines, with a fake clock.

use pcb_portfolio::config::SiteConfig;
use pcb_portfolio::i18n::{key_paths, lookup, Language};
use pcb_portfolio::interaction::{Interaction, Notice};
use pcb_portfolio::layout::Node;
use pcb_portfolio::modal;
use pcb_portfolio::parallax::{advance, Parallax};
use pcb_portfolio::placement::{ComponentType, PLACEMENTS};
use pcb_portfolio::scene::camera::OrbitCamera;
use pcb_portfolio::scene::recipes::recipe;
use pcb_portfolio::scene::SceneModel;
use pcb_portfolio::shell::{self, SceneSlot, UiState};

fn title(panel: &Node) -> Option<String> {
    panel.find_class("modal-title").first().and_then(|n| n.text.clone())
}

fn ui() -> UiState {
    let cfg = SiteConfig::default();
    UiState::new(cfg.language, cfg.modal_grace_ms)
}

#[test]
fn clicking_the_mcu_opens_about_me_in_either_language() {
    let cfg = SiteConfig::default();
    let model = SceneModel::new(&cfg);
    let camera = OrbitCamera::new(&cfg.camera, 16.0 / 9.0);
    let (w, h) = (1600.0, 900.0);

    let mcu = model.components.iter().find(|c| c.placement.id == "mcu").unwrap();
    let px = camera.project(mcu.world().transform_point3(mcu.hit_box.center()), w, h).unwrap();
    let hit = model.pick(&camera.ray(px.x, px.y, w, h));

    let mut interaction = Interaction::new();
    let mut ui = ui();
    match interaction.click(hit) {
        Some(Notice::Select(id)) => ui.select(id),
        other => panic!("expected a selection, got {other:?}"),
    }
    interaction.set_modal_open(true);
    assert_eq!(title(&ui.panel().unwrap()).as_deref(), Some("ABOUT ME"));

    ui.set_language(Language::Tr);
    assert!(ui.is_modal_open());
    assert_eq!(title(&ui.panel().unwrap()).as_deref(), Some("HAKKIMDA"));
}

#[test]
fn closing_keeps_content_for_the_grace_window() {
    let mut ui = ui();
    ui.select("osc");
    ui.close(1_000.0);
    assert!(!ui.is_modal_open());
    assert!(!ui.tick(1_299.0));
    assert!(ui.panel().is_some());
    assert!(ui.tick(1_300.0));
    assert!(ui.panel().is_none());
}

#[test]
fn reopening_inside_the_grace_window_keeps_the_panel() {
    let mut ui = ui();
    ui.select("osc");
    ui.close(0.0);
    ui.select("mem");
    assert!(!ui.tick(1_000.0));
    assert_eq!(ui.selected(), Some("mem"));
}

#[test]
fn overlapping_hovers_leave_only_the_latest() {
    let mut i = Interaction::new();
    i.pointer_enter("mcu");
    i.pointer_enter("osc");
    assert_eq!(i.pointer_leave("mcu"), None);
    assert_eq!(i.hovered(), Some("osc"));
}

#[test]
fn a_wheel_burst_advances_one_section() {
    let mut p = Parallax::new(5, &SiteConfig::default());
    let started = (0..5).filter(|i| p.wheel(100.0, f64::from(*i) * 80.0).is_some()).count();
    assert_eq!(started, 1);
    p.tick(600.0);
    assert_eq!(p.current, 1);
    assert_eq!(advance(4, 1, 5), 0);
    assert_eq!(advance(0, -1, 5), 4);
}

#[test]
fn every_kind_has_a_mesh_and_a_panel() {
    for kind in ComponentType::ALL {
        let r = recipe(kind);
        assert!(!r.parts.is_empty(), "{kind} has no mesh");
        let placement = PLACEMENTS.iter().find(|p| p.kind == kind).unwrap();
        let panel = modal::body(placement, Language::En);
        assert!(title(&panel).is_some(), "{kind} has no panel");
    }
}

/// Text and attribute values that fell back to a bracketed key path.
fn untranslated(tree: &Node) -> Vec<String> {
    tree.walk()
        .into_iter()
        .flat_map(|n| n.text.iter().chain(n.attrs.iter().map(|(_, v)| v)))
        .filter(|v| v.starts_with('['))
        .cloned()
        .collect()
}

#[test]
fn presenter_text_resolves_in_both_locales() {
    assert_eq!(key_paths(Language::En), key_paths(Language::Tr));
    for lang in Language::ALL {
        let mut ui = UiState::new(lang, SiteConfig::default().modal_grace_ms);
        ui.toggle_menu();
        let mut trees = vec![
            shell::header(lang),
            shell::language_menu(&ui),
            modal::not_found(lang),
        ];
        trees.extend(
            [SceneSlot::Loading, SceneSlot::Failed("no webgl2".into())]
                .iter()
                .filter_map(|slot| slot.placeholder(lang)),
        );
        trees.extend(PLACEMENTS.iter().map(|p| modal::present(p, lang)));
        for tree in &trees {
            assert_eq!(untranslated(tree), Vec::<String>::new(), "{lang}");
        }
    }
}

#[test]
fn every_key_the_site_reads_exists_in_both_locales() {
    const USED: &[&str] = &[
        "close",
        "modal.notFound",
        "name",
        "title",
        "subtitle",
        "status.active",
        "status.version",
        "loading.scene",
        "loading.failed",
        "loading.retry",
        "about.details",
        "about.focusAreas",
        "about.learningStyle",
        "education.period",
        "education.gpa",
        "education.year",
        "education.expectedGraduation",
        "education.achievements",
        "experience.achievements",
        "projects.viewProject",
        "languages.proficiency",
        "goals.careerGoals",
        "goals.avoidedPaths",
        "workflow.principles",
        "workflow.preferred",
        "workflow.tools",
        "contact.email",
        "contact.location",
        "contact.message",
    ];
    for lang in Language::ALL {
        for key in USED {
            assert!(lookup(lang, key).is_some(), "{lang} is missing {key}");
        }
        for kind in ComponentType::ALL {
            let key = kind.label_key();
            assert!(lookup(lang, &key).is_some(), "{lang} is missing {key}");
        }
    }
}
