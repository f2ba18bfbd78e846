use approx::{assert_abs_diff_eq, assert_relative_eq};
use building_engine::*;
use building_ops::ElementKind;
use scene_kernel::{KernelCall, KernelQuery, MemoryKernel};
use storefront_types::*;

const DEMO: &str = include_str!("../../../demos/storefront.json");

fn demo() -> BuildingSpec {
    load_spec(DEMO).unwrap()
}

fn cutout(wall: &str, x: f64, y: f64, z: f64) -> CutoutSpec {
    CutoutSpec {
        wall: wall.to_string(),
        width: 1.0,
        height: 1.0,
        position: CutoutPosition { x, y, z },
        recess_depth: 0.0,
        reveal_depth: 0.0,
    }
}

// ── Elements ─────────────────────────────────────────────────────────────

#[test]
fn front_wall_scenario() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build_elements(&spec, &mut k).unwrap();

    let wall = scene.get("Wall_Front").unwrap();
    assert_eq!(wall.center, [0.0, -7.5, 1.5]);
    assert_eq!(wall.dimensions.width, 8.5);
    assert_eq!(wall.dimensions.depth, 0.25);
    assert_eq!(wall.dimensions.height, 3.0);

    let measured = k.world_bounds(&wall.handle).unwrap().size();
    assert_eq!(measured, [8.5, 0.25, 3.0]);
}

#[test]
fn builds_every_named_element() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build_elements(&spec, &mut k).unwrap();

    let expected = [
        "Foundation",
        "Wall_Front",
        "Wall_Rear",
        "Wall_Left",
        "Wall_Right",
        "Alcove_Wall_Left",
        "Alcove_Wall_Right",
        "Alcove_Wall_Back",
        "Alcove_Ceiling",
        "Alcove_Header_Bar",
        "Roof",
        "Parapet_Front",
        "Parapet_Left_Level_1",
        "Parapet_Right_Level_1",
        "Parapet_Left_Level_2",
        "Parapet_Right_Level_2",
        "Parapet_Left_Level_3",
        "Parapet_Right_Level_3",
        "Canopy_Roof",
        "Canopy_Post_1",
        "Canopy_Post_2",
        "Chimney",
        "Chimney_Gable",
    ];
    assert_eq!(scene.names(), expected);
    assert_eq!(k.live_count(), expected.len());
}

#[test]
fn vertical_stacking() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build_elements(&spec, &mut k).unwrap();
    let bounds = |name: &str| k.world_bounds(&scene.get(name).unwrap().handle).unwrap();

    let foundation = bounds("Foundation");
    assert_relative_eq!(foundation.max[2], 0.0, epsilon = 1e-9);
    assert_relative_eq!(foundation.min[2], -0.28, epsilon = 1e-9);

    let roof = bounds("Roof");
    assert_relative_eq!(roof.min[2], 3.0, epsilon = 1e-9);
    assert_relative_eq!(roof.max[2], 3.3, epsilon = 1e-9);
    assert_relative_eq!(roof.size()[0], 8.75, epsilon = 1e-9);

    let parapet = bounds("Parapet_Front");
    assert_relative_eq!(parapet.min[2], 3.3, epsilon = 1e-9);
    assert_relative_eq!(parapet.max[2], 3.83, epsilon = 1e-9);

    let chimney = bounds("Chimney");
    assert_relative_eq!(chimney.min[2], 3.3, epsilon = 1e-9);
    assert_relative_eq!(chimney.max[2], 4.8, epsilon = 1e-9);

    let gable = bounds("Chimney_Gable");
    assert_relative_eq!(gable.min[2], 4.8, epsilon = 1e-9);
    assert_relative_eq!(gable.max[2], 5.1, epsilon = 1e-9);
}

#[test]
fn parapet_steps_walk_along_depth() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build_elements(&spec, &mut k).unwrap();

    let centers: Vec<f64> = (1..=3)
        .map(|i| scene.get(&format!("Parapet_Left_Level_{}", i)).unwrap().center[1])
        .collect();
    assert_relative_eq!(centers[0], -5.625, epsilon = 1e-9);
    assert_relative_eq!(centers[1], -1.875, epsilon = 1e-9);
    assert_relative_eq!(centers[2], 1.875, epsilon = 1e-9);

    // Zero-height fourth step produces nothing.
    assert!(!scene.contains("Parapet_Left_Level_4"));
    assert!(!scene.contains("Parapet_Right_Level_4"));

    let right = scene.get("Parapet_Right_Level_2").unwrap();
    assert_relative_eq!(right.center[0], 4.25, epsilon = 1e-9);
    assert_relative_eq!(right.dimensions.height, 0.30, epsilon = 1e-9);
}

#[test]
fn no_parapet_section_means_no_parapet() {
    let mut spec = demo();
    spec.parapet = None;
    let mut k = MemoryKernel::new();
    let scene = build_elements(&spec, &mut k).unwrap();
    assert!(scene.names().iter().all(|n| !n.starts_with("Parapet")));
}

#[test]
fn parapet_span_mismatch_stops_build_before_kernel() {
    let mut spec = demo();
    spec.parapet.as_mut().unwrap().steps[0].span = 5.0;
    let mut k = MemoryKernel::new();
    let err = build_elements(&spec, &mut k).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Invalid(SpecError::ParapetSpanMismatch { .. })
    ));
    assert!(k.calls().is_empty());
}

#[test]
fn canopy_and_posts_positioned_from_document() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build_elements(&spec, &mut k).unwrap();

    let canopy = scene.get("Canopy_Roof").unwrap();
    assert_relative_eq!(canopy.center[1], -8.4, epsilon = 1e-9);
    assert_relative_eq!(canopy.center[2], 2.975, epsilon = 1e-9);

    let post = scene.get("Canopy_Post_2").unwrap();
    assert_eq!(post.kind, ElementKind::Cylinder);
    assert_eq!(post.center, [1.65, -9.2, 1.4]);
    assert_relative_eq!(post.dimensions.width, 0.15, epsilon = 1e-9);
    assert_eq!(scene.with_role(Role::CanopyPost).count(), 2);
}

#[test]
fn explicit_canopy_center_is_used_as_given() {
    let mut spec = demo();
    spec.canopy.center = Some(PlanPoint { x: 1.0, y: -9.0 });
    let mut k = MemoryKernel::new();
    let scene = build_elements(&spec, &mut k).unwrap();
    let canopy = scene.get("Canopy_Roof").unwrap();
    assert_eq!(canopy.center[0], 1.0);
    assert_eq!(canopy.center[1], -9.0);
}

#[test]
fn alcove_walls_mirror_each_other() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build_elements(&spec, &mut k).unwrap();

    let left = scene.get("Alcove_Wall_Left").unwrap();
    let right = scene.get("Alcove_Wall_Right").unwrap();
    assert_eq!(left.kind, ElementKind::CustomHexahedron);
    assert_abs_diff_eq!(left.center[0], -right.center[0], epsilon = 1e-12);
    assert_abs_diff_eq!(left.rotation_z, -right.rotation_z, epsilon = 1e-12);

    let lv = k.vertices_of(&left.handle).unwrap();
    let rv = k.vertices_of(&right.handle).unwrap();
    assert_eq!(lv.len(), 8);
    for (a, b) in lv.iter().zip(rv) {
        assert_abs_diff_eq!(a[0], -b[0], epsilon = 1e-12);
        assert_abs_diff_eq!(a[1], b[1], epsilon = 1e-12);
        assert_abs_diff_eq!(a[2], b[2], epsilon = 1e-12);
    }
}

#[test]
fn header_bar_top_sits_at_z_top() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build_elements(&spec, &mut k).unwrap();
    let bar = k
        .world_bounds(&scene.get("Alcove_Header_Bar").unwrap().handle)
        .unwrap();
    assert_relative_eq!(bar.max[2], 3.0, epsilon = 1e-9);
    assert_relative_eq!(bar.min[2], 2.8, epsilon = 1e-9);
}

#[test]
fn every_element_gets_its_palette_color() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build_elements(&spec, &mut k).unwrap();
    for el in scene.elements() {
        assert_eq!(
            k.color_of(&el.handle),
            Some(spec.colors.color_for(el.role)),
            "{}",
            el.name
        );
    }
    assert_eq!(
        k.color_of(&scene.get("Wall_Left").unwrap().handle),
        Some("#8A8A8A")
    );
}

// ── Cutouts ──────────────────────────────────────────────────────────────

#[test]
fn demo_cutouts_all_apply() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let outcome = build(&spec, &mut k).unwrap();

    assert_eq!(outcome.cutouts.applied_count(), 8);
    assert!(outcome.cutouts.diagnostics.is_empty());
    // Cutters never outlive their difference.
    assert_eq!(k.live_count(), outcome.scene.len());

    let front = outcome.scene.get("Wall_Front").unwrap();
    assert_eq!(k.cuts_on(&front.handle).len(), 3);
}

#[test]
fn cutouts_on_one_wall_run_in_document_order() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    build(&spec, &mut k).unwrap();

    let cutters: Vec<&str> = k
        .calls()
        .iter()
        .filter_map(|c| match c {
            KernelCall::BooleanDifference { target, cutter } if target == "Wall_Front" => {
                Some(cutter.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        cutters,
        vec![
            "Cutter_display_window_left",
            "Cutter_display_window_right",
            "Cutter_entry_opening"
        ]
    );
}

#[test]
fn unknown_wall_keys_skip_with_one_diagnostic_each() {
    let mut spec = demo();
    spec.cutouts = Cutouts::new();
    spec.opening_fill.clear();
    spec.cutouts.insert("a", cutout("skylight", 0.0, 0.0, 1.0));
    spec.cutouts.insert("b", cutout("front", -3.0, -7.5, 1.0));
    spec.cutouts.insert("c", cutout("basement", 0.0, 0.0, 1.0));

    let mut k = MemoryKernel::new();
    let outcome = build(&spec, &mut k).unwrap();

    assert_eq!(outcome.cutouts.applied_count(), 1);
    assert_eq!(outcome.cutouts.applied[0].name, "b");
    let d = &outcome.cutouts.diagnostics;
    assert_eq!(d.len(), 2);
    assert_eq!(d[0].cutout, "a");
    assert_eq!(
        d[0].reason,
        DiagnosticReason::UnknownWall {
            key: "skylight".into()
        }
    );
    assert_eq!(d[1].cutout, "c");
}

#[test]
fn alcove_cutout_without_alcove_is_skipped() {
    let mut spec = demo();
    spec.door_alcove = None;
    let mut k = MemoryKernel::new();
    let outcome = build(&spec, &mut k).unwrap();

    let skipped: Vec<&str> = outcome
        .cutouts
        .diagnostics
        .iter()
        .map(|d| d.cutout.as_str())
        .collect();
    assert_eq!(
        skipped,
        vec!["alcove_door", "alcove_window_left", "alcove_window_right"]
    );
    assert!(matches!(
        outcome.cutouts.diagnostics[0].reason,
        DiagnosticReason::WallNotBuilt {
            wall: WallKey::AlcoveBack
        }
    ));
    assert_eq!(outcome.cutouts.applied_count(), 5);
}

#[test]
fn kernel_failure_on_one_wall_does_not_stop_others() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    k.fail_booleans_on("Wall_Rear");
    let outcome = build(&spec, &mut k).unwrap();

    assert_eq!(outcome.cutouts.applied_count(), 7);
    assert_eq!(outcome.cutouts.diagnostics.len(), 1);
    assert_eq!(outcome.cutouts.diagnostics[0].cutout, "rear_door");
    assert!(matches!(
        outcome.cutouts.diagnostics[0].reason,
        DiagnosticReason::KernelRejected { .. }
    ));
    assert_eq!(k.live_count(), outcome.scene.len());
}

#[test]
fn alcove_cutters_rotate_opposite_ways() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let outcome = build(&spec, &mut k).unwrap();

    let rotation = |name: &str| {
        outcome
            .cutouts
            .applied
            .iter()
            .find(|a| a.name == name)
            .unwrap()
            .plan
            .rotation_z
    };
    let left = rotation("alcove_window_left");
    let right = rotation("alcove_window_right");
    assert!(left > 0.0);
    assert_abs_diff_eq!(right, -left, epsilon = 1e-12);
    assert_eq!(rotation("entry_opening"), 0.0);
}

#[test]
fn cutter_depth_exceeds_local_wall_thickness() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let outcome = build(&spec, &mut k).unwrap();
    let alcove_t = spec.door_alcove.as_ref().unwrap().thickness;

    for applied in &outcome.cutouts.applied {
        let c = spec.cutouts.get(&applied.name).unwrap();
        let t = if applied.wall.as_str().starts_with("alcove") {
            alcove_t
        } else {
            spec.walls.thickness
        };
        assert!(applied.plan.depth > t + c.recess_depth + c.reveal_depth);
    }
}

#[test]
fn side_wall_cutter_spans_wall_thickness_along_x() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let outcome = build(&spec, &mut k).unwrap();
    let wall = outcome.scene.get("Wall_Left").unwrap();
    let cut = &k.cuts_on(&wall.handle)[0];
    let size = cut.cutter_bounds.size();
    assert!(size[0] > spec.walls.thickness);
    assert_relative_eq!(size[1], 1.2, epsilon = 1e-9);
}

#[test]
fn cutters_follow_document_order_not_name_order() {
    let start = DEMO.find("\"cutouts\"").unwrap();
    let end = DEMO.find("\"validation_targets\"").unwrap();
    let cutouts = r#"{
        "z_first": {"wall": "rear", "width": 1.0, "height": 2.0, "position": {"x": -2.0, "y": 7.5, "z": 0.0}},
        "a_second": {"wall": "rear", "width": 1.0, "height": 2.0, "position": {"x": 2.0, "y": 7.5, "z": 0.0}}
    }"#;
    let json = format!(
        "{}\"cutouts\": {},\n    {}",
        &DEMO[..start],
        cutouts,
        &DEMO[end..]
    );
    let spec = load_spec(&json).unwrap();
    let mut k = MemoryKernel::new();
    build(&spec, &mut k).unwrap();

    let cutters: Vec<&str> = k
        .calls()
        .iter()
        .filter_map(|c| match c {
            KernelCall::BooleanDifference { cutter, .. } => Some(cutter.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(cutters, vec!["Cutter_z_first", "Cutter_a_second"]);
}

// ── Opening fill ─────────────────────────────────────────────────────────

#[test]
fn demo_openings_are_filled() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let outcome = build(&spec, &mut k).unwrap();

    // Five windows of five pieces, a single and a double door.
    assert_eq!(outcome.fills.pieces, 5 * 5 + 4 + 5);
    assert_eq!(outcome.fills.filled.len(), 7);
    assert!(outcome.fills.skipped.is_empty());
    assert!(!outcome.fills.filled.contains(&"entry_opening".to_string()));
    assert_eq!(k.live_count(), outcome.scene.len());
    assert_eq!(outcome.scene.with_role(Role::Glass).count(), 5);
    assert_eq!(outcome.scene.with_role(Role::Door).count(), 3);
}

#[test]
fn fills_are_created_after_every_cut() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    build(&spec, &mut k).unwrap();

    let calls = k.calls();
    let last_cut = calls
        .iter()
        .rposition(|c| matches!(c, KernelCall::BooleanDifference { .. }))
        .unwrap();
    let first_fill = calls
        .iter()
        .position(|c| matches!(c, KernelCall::CreateBox { name } if name.ends_with("_Frame_Top")))
        .unwrap();
    assert!(first_fill > last_cut);
}

#[test]
fn door_frame_has_no_sill_piece() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build(&spec, &mut k).unwrap().scene;

    let names: Vec<&str> = scene
        .names()
        .into_iter()
        .filter(|n| n.starts_with("Alcove_Door_"))
        .collect();
    assert_eq!(
        names,
        vec![
            "Alcove_Door_Frame_Top",
            "Alcove_Door_Frame_Left",
            "Alcove_Door_Frame_Right",
            "Alcove_Door_Panel",
        ]
    );
    assert!(scene.contains("Side_Window_Frame_Bottom"));

    // Door sides run from the sill up to the top piece.
    let side = k
        .world_bounds(&scene.get("Alcove_Door_Frame_Left").unwrap().handle)
        .unwrap();
    assert_relative_eq!(side.min[2], 0.0, epsilon = 1e-9);
    assert_relative_eq!(side.max[2], 2.15, epsilon = 1e-9);
}

#[test]
fn window_pieces_sit_inside_their_opening() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build(&spec, &mut k).unwrap().scene;
    let bounds = |name: &str| k.world_bounds(&scene.get(name).unwrap().handle).unwrap();

    let glass = scene.get("Display_Window_Left_Glass").unwrap();
    assert_eq!(glass.role, Role::Glass);
    assert_relative_eq!(glass.center[0], -3.0, epsilon = 1e-9);
    assert_relative_eq!(glass.center[1], -7.5, epsilon = 1e-9);
    assert_relative_eq!(glass.center[2], 1.6, epsilon = 1e-9);

    let top = bounds("Display_Window_Left_Frame_Top");
    assert_relative_eq!(top.max[2], 2.4, epsilon = 1e-9);
    let bottom = bounds("Display_Window_Left_Frame_Bottom");
    assert_relative_eq!(bottom.min[2], 0.8, epsilon = 1e-9);
    let left = bounds("Display_Window_Left_Frame_Left");
    assert_relative_eq!(left.min[0], -3.9, epsilon = 1e-9);
    let right = bounds("Display_Window_Left_Frame_Right");
    assert_relative_eq!(right.max[0], -2.1, epsilon = 1e-9);
}

#[test]
fn side_wall_fill_runs_along_y() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build(&spec, &mut k).unwrap().scene;

    let glass = k
        .world_bounds(&scene.get("Side_Window_Glass").unwrap().handle)
        .unwrap()
        .size();
    assert_relative_eq!(glass[0], 0.01, epsilon = 1e-9);
    assert_relative_eq!(glass[1], 1.08, epsilon = 1e-9);
    assert_relative_eq!(glass[2], 0.88, epsilon = 1e-9);

    let left = scene.get("Side_Window_Frame_Left").unwrap();
    assert_relative_eq!(left.center[0], -4.25, epsilon = 1e-9);
    assert_relative_eq!(left.center[1], 1.425, epsilon = 1e-9);
}

#[test]
fn alcove_window_fill_turns_with_its_cutter() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let outcome = build(&spec, &mut k).unwrap();

    for (cutout, prefix) in [
        ("alcove_window_left", "Alcove_Window_Left"),
        ("alcove_window_right", "Alcove_Window_Right"),
    ] {
        let plan = &outcome
            .cutouts
            .applied
            .iter()
            .find(|a| a.name == cutout)
            .unwrap()
            .plan;
        assert!(plan.rotation_z.abs() > 1e-6);
        for suffix in ["Frame_Top", "Frame_Bottom", "Frame_Left", "Frame_Right", "Glass"] {
            let el = outcome.scene.get(&format!("{}_{}", prefix, suffix)).unwrap();
            assert_eq!(el.kind, ElementKind::CustomHexahedron, "{}", el.name);
            assert_abs_diff_eq!(el.rotation_z, plan.rotation_z, epsilon = 1e-12);
        }
    }

    let glass = outcome.scene.get("Alcove_Window_Left_Glass").unwrap();
    assert_abs_diff_eq!(glass.center[0], -1.075, epsilon = 1e-12);
    assert_abs_diff_eq!(glass.center[1], -7.0, epsilon = 1e-12);
    assert_abs_diff_eq!(glass.center[2], 1.6, epsilon = 1e-12);
}

#[test]
fn double_door_leaves_flank_the_center_gap() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build(&spec, &mut k).unwrap().scene;

    let left = scene.get("Rear_Door_Panel_Left").unwrap();
    let right = scene.get("Rear_Door_Panel_Right").unwrap();
    assert_relative_eq!(left.center[0], 1.275, epsilon = 1e-9);
    assert_relative_eq!(right.center[0], 1.725, epsilon = 1e-9);
    assert_relative_eq!(left.center[2], 1.01, epsilon = 1e-9);
    assert!(!scene.contains("Rear_Door_Panel"));
}

#[test]
fn fill_pieces_get_their_role_colors() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build(&spec, &mut k).unwrap().scene;

    let color = |name: &str| k.color_of(&scene.get(name).unwrap().handle);
    assert_eq!(color("Side_Window_Frame_Top"), Some("#FFFFFF"));
    assert_eq!(color("Side_Window_Glass"), Some("#000000"));
    assert_eq!(color("Alcove_Door_Panel"), Some("#1A1A1A"));
}

#[test]
fn fill_skipped_when_its_cutout_is_skipped() {
    let mut spec = demo();
    spec.door_alcove = None;
    let mut k = MemoryKernel::new();
    let outcome = build(&spec, &mut k).unwrap();

    assert_eq!(
        outcome.fills.skipped,
        vec!["alcove_door", "alcove_window_left", "alcove_window_right"]
    );
    assert_eq!(outcome.fills.pieces, 3 * 5 + 5);
    assert!(outcome
        .scene
        .names()
        .iter()
        .all(|n| !n.starts_with("Alcove_Window") && !n.starts_with("Alcove_Door")));
}

#[test]
fn rejected_cut_leaves_its_opening_unfilled() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    k.fail_booleans_on("Wall_Rear");
    let outcome = build(&spec, &mut k).unwrap();

    assert_eq!(outcome.fills.skipped, vec!["rear_door"]);
    assert!(!outcome.scene.contains("Rear_Door_Frame_Top"));
    assert!(outcome.scene.contains("Alcove_Door_Panel"));
}

// ── Expectations ─────────────────────────────────────────────────────────

#[test]
fn expectations_name_only_built_elements() {
    let spec = demo();
    let mut k = MemoryKernel::new();
    let scene = build(&spec, &mut k).unwrap().scene;
    let expected = expected_elements(&spec);
    for e in &expected {
        assert!(scene.contains(&e.name), "{} not built", e.name);
    }
    // Axis-aligned fill pieces are measured; rotated ones are not.
    let names: Vec<&str> = expected.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"Side_Window_Glass"));
    assert!(names.contains(&"Rear_Door_Panel_Right"));
    assert!(!names.contains(&"Alcove_Window_Left_Glass"));
    let structural: Vec<String> = structural_elements(&spec)
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(structural.len(), 6);
    assert!(structural.contains(&"Roof".to_string()));
}
