use building_ops::{
    alcove_ceiling, alcove_cutter_rotation, alcove_side_wall, chimney_gable, execute_shape,
    Shape, Side,
};
use scene_kernel::Kernel;
use storefront_types::{BuildingSpec, DoorAlcove, Palette, Role};
use tracing::{info, instrument};

use crate::error::BuildError;
use crate::scene::Scene;

/// Create every element of the building, bottom to top.
///
/// Foundation below elevation 0, walls from 0 to wall height, then the
/// alcove, roof, parapet, canopy and chimney. Cutouts are not applied here.
#[instrument(skip_all, fields(cutouts = spec.cutouts.len()))]
pub fn build_elements(spec: &BuildingSpec, kernel: &mut dyn Kernel) -> Result<Scene, BuildError> {
    spec.validate()?;

    let mut b = Builder {
        kernel,
        palette: &spec.colors,
        scene: Scene::new(),
    };

    b.foundation(spec)?;
    b.walls(spec)?;
    if let Some(alcove) = &spec.door_alcove {
        b.alcove(alcove)?;
    }
    b.roof(spec)?;
    b.parapet(spec)?;
    b.canopy(spec)?;
    b.chimney(spec)?;

    info!(elements = b.scene.len(), "building elements created");
    Ok(b.scene)
}

struct Builder<'a> {
    kernel: &'a mut dyn Kernel,
    palette: &'a Palette,
    scene: Scene,
}

impl Builder<'_> {
    fn add(&mut self, name: &str, role: Role, shape: Shape) -> Result<(), BuildError> {
        let element = execute_shape(
            self.kernel,
            name,
            role,
            &shape,
            self.palette.color_for(role),
        )?;
        self.scene.insert(element)
    }

    fn add_box(
        &mut self,
        name: &str,
        role: Role,
        size: [f64; 3],
        center: [f64; 3],
    ) -> Result<(), BuildError> {
        self.add(name, role, Shape::Box { size, center })
    }

    fn foundation(&mut self, spec: &BuildingSpec) -> Result<(), BuildError> {
        let h = spec.foundation.height;
        self.add_box(
            "Foundation",
            Role::Foundation,
            [spec.overall.width, spec.overall.depth, h],
            [0.0, 0.0, -h / 2.0],
        )
    }

    fn walls(&mut self, spec: &BuildingSpec) -> Result<(), BuildError> {
        let (w, d) = (spec.overall.width, spec.overall.depth);
        let (t, h) = (spec.walls.thickness, spec.walls.height);
        let z = h / 2.0;
        self.add_box("Wall_Front", Role::Wall, [w, t, h], [0.0, -d / 2.0, z])?;
        self.add_box("Wall_Rear", Role::Wall, [w, t, h], [0.0, d / 2.0, z])?;
        self.add_box("Wall_Left", Role::Wall, [t, d, h], [-w / 2.0, 0.0, z])?;
        self.add_box("Wall_Right", Role::Wall, [t, d, h], [w / 2.0, 0.0, z])
    }

    fn alcove(&mut self, alcove: &DoorAlcove) -> Result<(), BuildError> {
        for (name, side) in [
            ("Alcove_Wall_Left", Side::Left),
            ("Alcove_Wall_Right", Side::Right),
        ] {
            self.add(
                name,
                Role::AlcoveWall,
                Shape::Hexahedron {
                    hex: alcove_side_wall(alcove, side),
                    rotation_z: alcove_cutter_rotation(alcove, side),
                },
            )?;
        }

        if let Some(back) = &alcove.back_wall {
            self.add_box(
                "Alcove_Wall_Back",
                Role::AlcoveWall,
                [back.width, alcove.thickness, back.height],
                [0.0, back.position_y, back.height / 2.0],
            )?;
        }

        if let Some(ceiling) = &alcove.ceiling {
            self.add(
                "Alcove_Ceiling",
                Role::Trim,
                Shape::Hexahedron {
                    hex: alcove_ceiling(alcove, ceiling),
                    rotation_z: 0.0,
                },
            )?;
        }

        if let Some(bar) = &alcove.header_bar {
            self.add_box(
                "Alcove_Header_Bar",
                Role::Trim,
                [bar.width, bar.depth, bar.height],
                [
                    bar.position.x,
                    bar.position.y,
                    bar.position.z_top - bar.height / 2.0,
                ],
            )?;
        }
        Ok(())
    }

    fn roof(&mut self, spec: &BuildingSpec) -> Result<(), BuildError> {
        let t = spec.roof.thickness;
        self.add_box(
            "Roof",
            Role::Roof,
            [spec.roof_width(), spec.roof_depth(), t],
            [0.0, 0.0, spec.walls.height + t / 2.0],
        )
    }

    /// Front facade piece plus a left/right pair per step. Step heights are
    /// measured from the roof top; a zero-height step still advances Y.
    fn parapet(&mut self, spec: &BuildingSpec) -> Result<(), BuildError> {
        let Some(parapet) = &spec.parapet else {
            return Ok(());
        };
        let (w, d) = (spec.overall.width, spec.overall.depth);
        let top = spec.roof_top();
        let t = parapet.thickness;

        if parapet.front_height > 0.0 {
            let h = parapet.front_height;
            self.add_box(
                "Parapet_Front",
                Role::Parapet,
                [spec.roof_width(), t, h],
                [0.0, -d / 2.0, top + h / 2.0],
            )?;
        }

        let mut y = -d / 2.0;
        for (i, step) in parapet.steps.iter().enumerate() {
            let level = i + 1;
            let yc = y + step.span / 2.0;
            y += step.span;
            if step.height <= 0.0 {
                continue;
            }
            let size = [t, step.span, step.height];
            let z = top + step.height / 2.0;
            self.add_box(
                &format!("Parapet_Left_Level_{}", level),
                Role::Parapet,
                size,
                [-w / 2.0, yc, z],
            )?;
            self.add_box(
                &format!("Parapet_Right_Level_{}", level),
                Role::Parapet,
                size,
                [w / 2.0, yc, z],
            )?;
        }
        Ok(())
    }

    fn canopy(&mut self, spec: &BuildingSpec) -> Result<(), BuildError> {
        let c = &spec.canopy;
        let center = spec.canopy_center();
        self.add_box(
            "Canopy_Roof",
            Role::Canopy,
            [c.width, c.depth, c.roof_thickness],
            [center.x, center.y, c.height + c.roof_thickness / 2.0],
        )?;
        for (i, post) in c.posts.iter().enumerate() {
            self.add(
                &format!("Canopy_Post_{}", i + 1),
                Role::CanopyPost,
                Shape::Cylinder {
                    radius: post.diameter / 2.0,
                    height: c.height,
                    center: [post.x, post.y, c.height / 2.0],
                },
            )?;
        }
        Ok(())
    }

    fn chimney(&mut self, spec: &BuildingSpec) -> Result<(), BuildError> {
        let c = &spec.chimney;
        let base = spec.chimney_base();
        self.add_box(
            "Chimney",
            Role::Chimney,
            [c.width, c.depth, c.height_above_roof],
            [c.position_x, c.position_y, base + c.height_above_roof / 2.0],
        )?;
        if let Some(gable) = &c.gable {
            self.add(
                "Chimney_Gable",
                Role::Chimney,
                Shape::Hexahedron {
                    hex: chimney_gable(
                        c.position_x,
                        c.position_y,
                        c.width,
                        c.depth,
                        spec.chimney_top(),
                        gable,
                    ),
                    rotation_z: 0.0,
                },
            )?;
        }
        Ok(())
    }
}
