use anyhow::{ensure, Result};
use glam::Vec3;
use wgpu::util::DeviceExt;

/// Recurring texture-strip width sampled by the narrow table parts. The
/// diffuse bitmap is a wide board; legs and bridges use a thin column of it.
pub const STRIP_U: f32 = 0.067913;

/// Triangle-soup mesh as three separate, tightly packed attribute streams.
/// The renderer draws whatever triple it is handed; the table builder below
/// is just one producer.
pub struct MeshData {
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
}

/// GPU-resident attribute buffers, uploaded once and immutable afterward.
pub struct MeshBuffers {
    pub position_buffer: wgpu::Buffer,
    pub uv_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl MeshData {
    pub fn new(
        positions: Vec<[f32; 3]>,
        uvs: Vec<[f32; 2]>,
        normals: Vec<[f32; 3]>,
    ) -> Result<Self> {
        ensure!(
            positions.len() == uvs.len() && positions.len() == normals.len(),
            "attribute streams differ in length: {} positions, {} uvs, {} normals",
            positions.len(),
            uvs.len(),
            normals.len()
        );
        ensure!(
            positions.len() % 3 == 0,
            "vertex count {} is not triangle-aligned",
            positions.len()
        );
        Ok(Self {
            positions,
            uvs,
            normals,
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    /// The table: four legs, four cross-bridges and the top slab, nine
    /// axis-aligned boxes in total. Model space is x right, y depth, z up;
    /// the slab sits at the +z end.
    pub fn table() -> Self {
        let mut b = Builder::default();

        let strip = UvRect {
            u0: 0.0,
            v0: 0.0,
            u1: STRIP_U,
            v1: 1.0,
        };

        // Legs run the full height, feet at z = -0.625 up to the slab.
        let legs = [
            ((-0.235, -0.235), (-0.165, -0.165)), // front left
            ((0.165, -0.235), (0.235, -0.165)),   // front right
            ((-0.235, 0.165), (-0.165, 0.235)),   // back left
            ((0.165, 0.165), (0.235, 0.235)),     // back right
        ];
        for ((x0, y0), (x1, y1)) in legs {
            b.box_part(
                Vec3::new(x0, y0, -0.625),
                Vec3::new(x1, y1, 0.595),
                strip,
                strip,
            );
        }

        // Top slab. Its upper face samples the wide board region of the
        // bitmap instead of the thin strip.
        b.box_part(
            Vec3::new(-0.255, -0.255, 0.595),
            Vec3::new(0.255, 0.255, 0.625),
            strip,
            UvRect {
                u0: 0.25,
                v0: 0.0,
                u1: 1.0,
                v1: 1.0,
            },
        );

        // Cross bridges bracing the legs near the feet.
        let bridges = [
            ((-0.235, -0.165), (-0.165, 0.165)), // left
            ((-0.165, -0.235), (0.165, -0.165)), // front
            ((0.165, -0.165), (0.235, 0.165)),   // right
            ((-0.165, 0.165), (0.165, 0.235)),   // back
        ];
        for ((x0, y0), (x1, y1)) in bridges {
            b.box_part(
                Vec3::new(x0, y0, -0.325),
                Vec3::new(x1, y1, -0.255),
                strip,
                strip,
            );
        }

        MeshData {
            positions: b.positions,
            uvs: b.uvs,
            normals: b.normals,
        }
    }

    /// One-time upload of the three attribute streams.
    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffers {
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_positions"),
            contents: bytemuck::cast_slice(&self.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uv_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_uvs"),
            contents: bytemuck::cast_slice(&self.uvs),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let normal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_normals"),
            contents: bytemuck::cast_slice(&self.normals),
            usage: wgpu::BufferUsages::VERTEX,
        });

        MeshBuffers {
            position_buffer,
            uv_buffer,
            normal_buffer,
            vertex_count: self.vertex_count(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct UvRect {
    u0: f32,
    v0: f32,
    u1: f32,
    v1: f32,
}

#[derive(Default)]
struct Builder {
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
}

impl Builder {
    /// Two triangles (a,b,c) and (a,c,d) sharing one flat normal.
    fn quad(&mut self, corners: [Vec3; 4], normal: Vec3, uv: UvRect) {
        let uv_corners = [
            [uv.u0, uv.v0],
            [uv.u1, uv.v0],
            [uv.u1, uv.v1],
            [uv.u0, uv.v1],
        ];
        for idx in [0, 1, 2, 0, 2, 3] {
            self.positions.push(corners[idx].to_array());
            self.uvs.push(uv_corners[idx]);
            self.normals.push(normal.to_array());
        }
    }

    /// Axis-aligned box: six quads with outward face normals. The +z face
    /// takes its own uv rect so the slab can sample a different region.
    fn box_part(&mut self, min: Vec3, max: Vec3, side_uv: UvRect, top_uv: UvRect) {
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);

        // -x / +x
        self.quad(
            [
                Vec3::new(x0, y0, z0),
                Vec3::new(x0, y1, z0),
                Vec3::new(x0, y1, z1),
                Vec3::new(x0, y0, z1),
            ],
            Vec3::NEG_X,
            side_uv,
        );
        self.quad(
            [
                Vec3::new(x1, y1, z0),
                Vec3::new(x1, y0, z0),
                Vec3::new(x1, y0, z1),
                Vec3::new(x1, y1, z1),
            ],
            Vec3::X,
            side_uv,
        );

        // -y / +y
        self.quad(
            [
                Vec3::new(x0, y0, z0),
                Vec3::new(x1, y0, z0),
                Vec3::new(x1, y0, z1),
                Vec3::new(x0, y0, z1),
            ],
            Vec3::NEG_Y,
            side_uv,
        );
        self.quad(
            [
                Vec3::new(x1, y1, z0),
                Vec3::new(x0, y1, z0),
                Vec3::new(x0, y1, z1),
                Vec3::new(x1, y1, z1),
            ],
            Vec3::Y,
            side_uv,
        );

        // -z / +z
        self.quad(
            [
                Vec3::new(x0, y0, z0),
                Vec3::new(x1, y0, z0),
                Vec3::new(x1, y1, z0),
                Vec3::new(x0, y1, z0),
            ],
            Vec3::NEG_Z,
            side_uv,
        );
        self.quad(
            [
                Vec3::new(x0, y0, z1),
                Vec3::new(x1, y0, z1),
                Vec3::new(x1, y1, z1),
                Vec3::new(x0, y1, z1),
            ],
            Vec3::Z,
            top_uv,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_expected_vertex_count() {
        let mesh = MeshData::table();
        // 9 boxes x 12 triangles x 3 vertices
        assert_eq!(mesh.vertex_count(), 324);
        assert_eq!(mesh.positions.len(), mesh.uvs.len());
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.positions.len() % 3, 0);
    }

    #[test]
    fn table_normals_are_unit_axes() {
        let mesh = MeshData::table();
        for n in &mesh.normals {
            let sum: f32 = n.iter().map(|c| c.abs()).sum();
            assert_eq!(sum, 1.0, "normal {:?} is not a unit axis", n);
        }
    }

    #[test]
    fn table_fits_its_bounding_box() {
        let mesh = MeshData::table();
        for p in &mesh.positions {
            assert!(p[0].abs() <= 0.255);
            assert!(p[1].abs() <= 0.255);
            assert!(p[2] >= -0.625 && p[2] <= 0.625);
        }
    }

    #[test]
    fn rejects_mismatched_streams() {
        let positions = vec![[0.0; 3]; 6];
        let uvs = vec![[0.0; 2]; 5];
        let normals = vec![[0.0; 3]; 6];
        assert!(MeshData::new(positions, uvs, normals).is_err());
    }

    #[test]
    fn rejects_non_triangle_counts() {
        let positions = vec![[0.0; 3]; 4];
        let uvs = vec![[0.0; 2]; 4];
        let normals = vec![[0.0; 3]; 4];
        assert!(MeshData::new(positions, uvs, normals).is_err());
    }
}
