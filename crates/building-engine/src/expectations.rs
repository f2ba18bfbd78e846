use building_ops::{plan_fill, Orientation};
use serde::{Deserialize, Serialize};
use storefront_types::{BuildingSpec, WallKey};

/// Expected bounding dimensions of one named element. An axis with an
/// expected value of zero or less is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementExpectation {
    pub name: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl ElementExpectation {
    pub fn new(name: impl Into<String>, width: f64, depth: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            width,
            depth,
            height,
        }
    }
}

/// Foundation, the four outer walls and the roof, straight from the document.
pub fn structural_elements(spec: &BuildingSpec) -> Vec<ElementExpectation> {
    let (w, d) = (spec.overall.width, spec.overall.depth);
    let (t, h) = (spec.walls.thickness, spec.walls.height);
    vec![
        ElementExpectation::new("Foundation", w, d, spec.foundation.height),
        ElementExpectation::new("Wall_Front", w, t, h),
        ElementExpectation::new("Wall_Rear", w, t, h),
        ElementExpectation::new("Wall_Left", t, d, h),
        ElementExpectation::new("Wall_Right", t, d, h),
        ElementExpectation::new(
            "Roof",
            spec.roof_width(),
            spec.roof_depth(),
            spec.roof.thickness,
        ),
    ]
}

/// Every box and cylinder element the document implies, including the
/// axis-aligned pieces of each opening fill.
pub fn expected_elements(spec: &BuildingSpec) -> Vec<ElementExpectation> {
    let mut out = structural_elements(spec);

    if let Some(parapet) = &spec.parapet {
        if parapet.front_height > 0.0 {
            out.push(ElementExpectation::new(
                "Parapet_Front",
                spec.roof_width(),
                parapet.thickness,
                parapet.front_height,
            ));
        }
        for (i, step) in parapet.steps.iter().enumerate() {
            if step.height <= 0.0 {
                continue;
            }
            for side in ["Left", "Right"] {
                out.push(ElementExpectation::new(
                    format!("Parapet_{}_Level_{}", side, i + 1),
                    parapet.thickness,
                    step.span,
                    step.height,
                ));
            }
        }
    }

    let c = &spec.canopy;
    out.push(ElementExpectation::new(
        "Canopy_Roof",
        c.width,
        c.depth,
        c.roof_thickness,
    ));
    for (i, post) in c.posts.iter().enumerate() {
        out.push(ElementExpectation::new(
            format!("Canopy_Post_{}", i + 1),
            post.diameter,
            post.diameter,
            c.height,
        ));
    }

    let ch = &spec.chimney;
    out.push(ElementExpectation::new(
        "Chimney",
        ch.width,
        ch.depth,
        ch.height_above_roof,
    ));

    if let Some(alcove) = &spec.door_alcove {
        if let Some(back) = &alcove.back_wall {
            out.push(ElementExpectation::new(
                "Alcove_Wall_Back",
                back.width,
                alcove.thickness,
                back.height,
            ));
        }
    }

    for named in &spec.cutouts {
        let Some(fill) = spec.opening_fill.get(&named.name) else {
            continue;
        };
        let Ok(wall) = named.spec.wall.parse::<WallKey>() else {
            continue;
        };
        let orientation = Orientation::for_wall(wall, spec.door_alcove.as_ref());
        for piece in plan_fill(&named.name, &named.spec, fill, orientation) {
            if let Some([w, d, h]) = piece.axis_aligned_size() {
                out.push(ElementExpectation::new(piece.name, w, d, h));
            }
        }
    }

    out
}
