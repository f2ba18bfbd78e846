use std::f64::consts::{FRAC_PI_2, PI};

use approx::{assert_abs_diff_eq, assert_relative_eq};
use building_ops::*;
use proptest::prelude::*;
use scene_kernel::{KernelCall, KernelQuery, MemoryKernel};
use storefront_types::*;

fn symmetric_alcove() -> DoorAlcove {
    DoorAlcove {
        y_front: -7.5,
        y_back: -6.5,
        left: AlcoveSide {
            front_x: -1.55,
            back_x: -0.6,
        },
        right: AlcoveSide {
            front_x: 1.55,
            back_x: 0.6,
        },
        thickness: 0.15,
        height: 3.0,
        back_wall: None,
        ceiling: None,
        header_bar: None,
    }
}

fn cutout(wall: &str, x: f64, y: f64) -> CutoutSpec {
    CutoutSpec {
        wall: wall.to_string(),
        width: 1.2,
        height: 1.0,
        position: CutoutPosition { x, y, z: 0.8 },
        recess_depth: 0.05,
        reveal_depth: 0.02,
    }
}

// ── Hexahedra ────────────────────────────────────────────────────────────

#[test]
fn oriented_box_without_rotation_matches_size() {
    let hex = Hexahedron::oriented_box([2.0, 1.0, 3.0], [1.0, 1.0, 1.5], 0.0);
    let b = hex.bounds();
    assert_eq!(b.min, [0.0, 0.5, 0.0]);
    assert_eq!(b.max, [2.0, 1.5, 3.0]);
}

#[test]
fn quarter_turn_swaps_plan_extents() {
    let hex = Hexahedron::oriented_box([2.0, 1.0, 3.0], [0.0; 3], FRAC_PI_2);
    let size = hex.bounds().size();
    assert_abs_diff_eq!(size[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(size[1], 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(size[2], 3.0, epsilon = 1e-12);
}

#[test]
fn alcove_walls_are_exact_mirrors() {
    let alcove = symmetric_alcove();
    let left = alcove_side_wall(&alcove, Side::Left);
    let right = alcove_side_wall(&alcove, Side::Right);
    let mirrored = left.mirrored_x();
    for (a, b) in mirrored.vertices().iter().zip(right.vertices()) {
        for i in 0..3 {
            assert_abs_diff_eq!(a[i], b[i], epsilon = 1e-12);
        }
    }
}

#[test]
fn alcove_wall_stops_at_back_wall_face() {
    let alcove = symmetric_alcove();
    let left = alcove_side_wall(&alcove, Side::Left);
    let b = left.bounds();
    assert_relative_eq!(b.min[1], -7.5, epsilon = 1e-9);
    assert_relative_eq!(b.max[1], -6.575, epsilon = 1e-9);
    // Outer face of the left wall is on its -X side.
    assert_relative_eq!(b.min[0], -1.625, epsilon = 1e-9);
    assert_relative_eq!(b.max[0], -0.525, epsilon = 1e-9);
    assert_relative_eq!(b.max[2], 3.0, epsilon = 1e-9);
}

#[test]
fn ceiling_spans_front_and_back_widths() {
    let alcove = symmetric_alcove();
    let ceiling = AlcoveCeiling {
        thickness: 0.1,
        elevation: 2.9,
        front_width: 3.1,
        back_width: 1.2,
    };
    let hex = alcove_ceiling(&alcove, &ceiling);
    let v = hex.vertices();
    assert_relative_eq!(v[1][0] - v[0][0], 3.1, epsilon = 1e-9);
    assert_relative_eq!(v[2][0] - v[3][0], 1.2, epsilon = 1e-9);
    let b = hex.bounds();
    assert_relative_eq!(b.min[2], 2.9, epsilon = 1e-9);
    assert_relative_eq!(b.max[2], 3.0, epsilon = 1e-9);
}

#[test]
fn sharp_gable_collapses_ridge() {
    let gable = ChimneyGable {
        height: 0.3,
        ridge_width: 0.0,
    };
    let hex = chimney_gable(2.5, 4.0, 0.6, 0.6, 4.8, &gable);
    let v = hex.vertices();
    assert_eq!(v[2], v[3]);
    assert_eq!(v[6], v[7]);
    let b = hex.bounds();
    assert_relative_eq!(b.max[2], 5.1, epsilon = 1e-9);
    assert_relative_eq!(b.size()[0], 0.6, epsilon = 1e-9);
}

// ── Cutters ──────────────────────────────────────────────────────────────

#[test]
fn cutter_depth_adds_margins_and_clearance() {
    let c = cutout("front", 0.0, -7.5);
    assert_relative_eq!(cutter_depth(0.25, &c), 0.25 + 0.05 + 0.02 + 0.02, epsilon = 1e-9);
    assert!(cutter_depth(0.25, &c) > 0.25 + c.recess_depth + c.reveal_depth);
}

#[test]
fn cutter_center_lifts_sill_by_half_height() {
    let c = cutout("front", -3.0, -7.5);
    let center = cutter_center(&c);
    assert_eq!(center[0], -3.0);
    assert_eq!(center[1], -7.5);
    assert_relative_eq!(center[2], 1.3, epsilon = 1e-9);
}

#[test]
fn front_wall_cutter_has_width_along_x() {
    let plan = CutterPlan::straight(WallKey::Front, &cutout("front", 0.0, -7.5), 0.25);
    assert_relative_eq!(plan.size[0], 1.2, epsilon = 1e-9);
    assert_relative_eq!(plan.size[1], plan.depth, epsilon = 1e-9);
    assert!(plan.is_axis_aligned());
}

#[test]
fn side_wall_cutter_has_width_along_y() {
    let plan = CutterPlan::straight(WallKey::Left, &cutout("left", -4.25, 2.0), 0.25);
    assert_relative_eq!(plan.size[0], plan.depth, epsilon = 1e-9);
    assert_relative_eq!(plan.size[1], 1.2, epsilon = 1e-9);
}

#[test]
fn symmetric_alcove_gives_opposite_rotations() {
    let alcove = symmetric_alcove();
    let left = alcove_cutter_rotation(&alcove, Side::Left);
    let right = alcove_cutter_rotation(&alcove, Side::Right);
    assert_abs_diff_eq!(right, -left, epsilon = 1e-12);
    // 90° minus atan2(0.95, 1.0).
    assert_abs_diff_eq!(left, FRAC_PI_2 - 0.95f64.atan2(1.0), epsilon = 1e-12);
}

#[test]
fn angled_cutter_width_runs_along_wall() {
    let alcove = symmetric_alcove();
    let rotation = alcove_cutter_rotation(&alcove, Side::Left);
    let plan = CutterPlan::angled(&cutout("alcove_left", -1.075, -7.0), 0.15, rotation);
    let v = plan.hexahedron();
    let v = v.vertices();
    // Cap A to cap B spans the width; it must be parallel to the wall.
    let along = [v[0][0] - v[4][0], v[0][1] - v[4][1]];
    let wall = [
        alcove.left.back_x - alcove.left.front_x,
        alcove.y_back - alcove.y_front,
    ];
    let cross = along[0] * wall[1] - along[1] * wall[0];
    assert_abs_diff_eq!(cross, 0.0, epsilon = 1e-9);
}

// ── Execution against the kernel ─────────────────────────────────────────

#[test]
fn execute_shape_creates_and_colors() {
    let mut k = MemoryKernel::new();
    let shape = Shape::Box {
        size: [8.5, 0.25, 3.0],
        center: [0.0, -7.5, 1.5],
    };
    let el = execute_shape(&mut k, "Wall_Front", Role::Wall, &shape, "#808080").unwrap();
    assert_eq!(el.kind, ElementKind::Box);
    assert_eq!(el.dimensions.width, 8.5);
    assert_eq!(k.color_of(&el.handle), Some("#808080"));
    assert_eq!(k.solid_name(&el.handle), Some("Wall_Front"));
}

#[test]
fn execute_shape_reports_kernel_failure() {
    let mut k = MemoryKernel::new();
    let shape = Shape::Box {
        size: [8.5, 0.25, 3.0],
        center: [0.0, -7.5, 1.5],
    };
    let err = execute_shape(&mut k, "Wall_Front", Role::Wall, &shape, "grey").unwrap_err();
    assert!(matches!(err, OpError::Create { .. }));
}

#[test]
fn rotated_cutter_is_baked_into_custom_volume() {
    let alcove = symmetric_alcove();
    let mut k = MemoryKernel::new();
    let wall = execute_shape(
        &mut k,
        "Alcove_Wall_Left",
        Role::AlcoveWall,
        &Shape::Hexahedron {
            hex: alcove_side_wall(&alcove, Side::Left),
            rotation_z: 0.0,
        },
        "#808080",
    )
    .unwrap();
    let rotation = alcove_cutter_rotation(&alcove, Side::Left);
    let plan = CutterPlan::angled(&cutout("alcove_left", -1.075, -7.0), 0.15, rotation);

    execute_cut(&mut k, &wall, "Cutter_window", &plan).unwrap();

    let cuts = k.cuts_on(&wall.handle);
    assert_eq!(cuts.len(), 1);
    assert_eq!(cuts[0].cutter_vertices, plan.hexahedron().vertices().to_vec());
    assert_eq!(k.live_count(), 1);
    assert!(k.find("Cutter_window").is_none());
}

#[test]
fn straight_cutter_is_a_plain_box() {
    let mut k = MemoryKernel::new();
    let wall = execute_shape(
        &mut k,
        "Wall_Front",
        Role::Wall,
        &Shape::Box {
            size: [8.5, 0.25, 3.0],
            center: [0.0, -7.5, 1.5],
        },
        "#808080",
    )
    .unwrap();
    let plan = CutterPlan::straight(WallKey::Front, &cutout("front", -3.0, -7.5), 0.25);
    execute_cut(&mut k, &wall, "Cutter_a", &plan).unwrap();
    assert!(k
        .calls()
        .iter()
        .any(|c| matches!(c, KernelCall::CreateBox { name } if name == "Cutter_a")));
}

// ── Properties ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalized_rotation_is_in_half_open_range(angle in -20.0f64..20.0) {
        let a = normalize_half_turn(angle);
        prop_assert!(a > -FRAC_PI_2 - 1e-12 && a <= FRAC_PI_2 + 1e-12);
        // Differs from the input by a whole number of half turns.
        let turns = (angle - a) / PI;
        prop_assert!((turns - turns.round()).abs() < 1e-9);
    }

    #[test]
    fn mirrored_side_walls_for_any_symmetric_alcove(
        front in 1.0f64..3.0,
        narrowing in 0.1f64..0.9,
        thickness in 0.05f64..0.3,
    ) {
        let mut alcove = symmetric_alcove();
        let back = front * narrowing;
        alcove.left = AlcoveSide { front_x: -front, back_x: -back };
        alcove.right = AlcoveSide { front_x: front, back_x: back };
        alcove.thickness = thickness;

        let left = alcove_side_wall(&alcove, Side::Left).mirrored_x();
        let right = alcove_side_wall(&alcove, Side::Right);
        for (a, b) in left.vertices().iter().zip(right.vertices()) {
            for i in 0..3 {
                prop_assert!((a[i] - b[i]).abs() < 1e-12);
            }
        }
        let l = alcove_cutter_rotation(&alcove, Side::Left);
        let r = alcove_cutter_rotation(&alcove, Side::Right);
        prop_assert!((l + r).abs() < 1e-12);
    }
}
