use crate::cutouts::CutoutSpec;
use crate::errors::SpecError;
use crate::fill::OpeningFill;
use crate::palette::parse_hex_color;
use crate::spec::BuildingSpec;

/// Parapet spans may differ from the building depth by at most this much.
pub const SPAN_TOLERANCE: f64 = 1e-6;

impl BuildingSpec {
    /// Check the invariants the builder relies on. Reports the first failure.
    pub fn validate(&self) -> Result<(), SpecError> {
        positive("overall.width", self.overall.width)?;
        positive("overall.depth", self.overall.depth)?;
        positive("walls.thickness", self.walls.thickness)?;
        positive("walls.height", self.walls.height)?;
        positive("foundation.height", self.foundation.height)?;
        positive("roof.thickness", self.roof.thickness)?;
        if let Some(w) = self.roof.width {
            positive("roof.width", w)?;
        }
        if let Some(d) = self.roof.depth {
            positive("roof.depth", d)?;
        }

        if let Some(parapet) = &self.parapet {
            positive("parapet.thickness", parapet.thickness)?;
            non_negative("parapet.front_height", parapet.front_height)?;
            for (i, step) in parapet.steps.iter().enumerate() {
                positive(&format!("parapet.steps[{}].span", i), step.span)?;
                non_negative(&format!("parapet.steps[{}].height", i), step.height)?;
            }
            let total: f64 = parapet.steps.iter().map(|s| s.span).sum();
            if (total - self.overall.depth).abs() > SPAN_TOLERANCE {
                return Err(SpecError::ParapetSpanMismatch {
                    total,
                    depth: self.overall.depth,
                });
            }
        }

        positive("canopy.width", self.canopy.width)?;
        positive("canopy.depth", self.canopy.depth)?;
        positive("canopy.height", self.canopy.height)?;
        positive("canopy.roof_thickness", self.canopy.roof_thickness)?;
        for (i, post) in self.canopy.posts.iter().enumerate() {
            positive(&format!("canopy.posts[{}].diameter", i), post.diameter)?;
        }

        positive("chimney.width", self.chimney.width)?;
        positive("chimney.depth", self.chimney.depth)?;
        positive("chimney.height_above_roof", self.chimney.height_above_roof)?;
        if let Some(gable) = &self.chimney.gable {
            positive("chimney.gable.height", gable.height)?;
            non_negative("chimney.gable.ridge_width", gable.ridge_width)?;
        }

        if let Some(alcove) = &self.door_alcove {
            positive("door_alcove.thickness", alcove.thickness)?;
            positive("door_alcove.height", alcove.height)?;
            if alcove.y_back <= alcove.y_front {
                return Err(SpecError::AlcoveInverted {
                    y_front: alcove.y_front,
                    y_back: alcove.y_back,
                });
            }
            let (front, back) = (alcove.front_opening(), alcove.back_opening());
            if back <= 0.0 || front <= back {
                return Err(SpecError::AlcoveNotNarrowing { front, back });
            }
            if let Some(wall) = &alcove.back_wall {
                positive("door_alcove.back_wall.width", wall.width)?;
                positive("door_alcove.back_wall.height", wall.height)?;
            }
            if let Some(ceiling) = &alcove.ceiling {
                positive("door_alcove.ceiling.thickness", ceiling.thickness)?;
                positive("door_alcove.ceiling.front_width", ceiling.front_width)?;
                positive("door_alcove.ceiling.back_width", ceiling.back_width)?;
            }
            if let Some(bar) = &alcove.header_bar {
                positive("door_alcove.header_bar.width", bar.width)?;
                positive("door_alcove.header_bar.height", bar.height)?;
                positive("door_alcove.header_bar.depth", bar.depth)?;
            }
        }

        for cutout in &self.cutouts {
            let name = &cutout.name;
            positive(&format!("cutouts.{}.width", name), cutout.spec.width)?;
            positive(&format!("cutouts.{}.height", name), cutout.spec.height)?;
            non_negative(
                &format!("cutouts.{}.recess_depth", name),
                cutout.spec.recess_depth,
            )?;
            non_negative(
                &format!("cutouts.{}.reveal_depth", name),
                cutout.spec.reveal_depth,
            )?;
        }

        for (name, fill) in &self.opening_fill {
            let cutout = self
                .cutouts
                .get(name)
                .ok_or_else(|| SpecError::UnknownFillTarget {
                    cutout: name.clone(),
                })?;
            validate_fill(name, cutout, fill)?;
        }

        for (role, value) in self.colors.entries() {
            if parse_hex_color(value).is_none() {
                return Err(SpecError::InvalidColor {
                    role: role.to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Every fill piece must sit inside the cut opening, and the glass or door
/// leaves inside the frame.
fn validate_fill(name: &str, cutout: &CutoutSpec, fill: &OpeningFill) -> Result<(), SpecError> {
    let field = |f: &str| format!("opening_fill.{}.{}", name, f);
    let misfit = |reason: String| SpecError::FillDoesNotFit {
        cutout: name.to_string(),
        reason,
    };

    let frame = fill.frame();
    positive(&field("frame.width"), frame.width)?;
    positive(&field("frame.height"), frame.height)?;
    positive(&field("frame.thickness"), frame.thickness)?;
    positive(&field("frame.depth"), frame.depth)?;

    if frame.width > cutout.width + SPAN_TOLERANCE || frame.height > cutout.height + SPAN_TOLERANCE
    {
        return Err(misfit(format!(
            "frame {} x {} exceeds opening {} x {}",
            frame.width, frame.height, cutout.width, cutout.height
        )));
    }
    // A door frame has no bottom piece.
    let pieces_high = if fill.is_door() { 1.0 } else { 2.0 };
    let inner_height = frame.height - pieces_high * frame.thickness;
    if frame.inner_width() <= 0.0 || inner_height <= 0.0 {
        return Err(misfit(format!(
            "frame thickness {} leaves no clear opening",
            frame.thickness
        )));
    }

    match fill {
        OpeningFill::Window { glass, .. } => {
            positive(&field("glass.width"), glass.width)?;
            positive(&field("glass.height"), glass.height)?;
            positive(&field("glass.thickness"), glass.thickness)?;
            if glass.width > frame.inner_width() + SPAN_TOLERANCE
                || glass.height > inner_height + SPAN_TOLERANCE
            {
                return Err(misfit(format!(
                    "glass {} x {} exceeds frame interior {} x {}",
                    glass.width,
                    glass.height,
                    frame.inner_width(),
                    inner_height
                )));
            }
        }
        OpeningFill::Door { panels, .. } => {
            if !(1..=2).contains(&panels.count) {
                return Err(misfit(format!(
                    "door needs one or two panels, got {}",
                    panels.count
                )));
            }
            positive(&field("panels.width"), panels.width)?;
            positive(&field("panels.height"), panels.height)?;
            positive(&field("panels.thickness"), panels.thickness)?;
            non_negative(&field("panels.center_gap"), panels.center_gap)?;
            if panels.total_width() > frame.inner_width() + SPAN_TOLERANCE
                || panels.height > inner_height + SPAN_TOLERANCE
            {
                return Err(misfit(format!(
                    "panels {} x {} exceed frame interior {} x {}",
                    panels.total_width(),
                    panels.height,
                    frame.inner_width(),
                    inner_height
                )));
            }
        }
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), SpecError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SpecError::NonPositive {
            field: field.to_string(),
            value,
        })
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), SpecError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SpecError::Negative {
            field: field.to_string(),
            value,
        })
    }
}
