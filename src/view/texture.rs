use anyhow::{ensure, Context, Result};
use std::path::Path;

/// Diffuse texture bound at unit 0, plus its bind group.
pub struct DiffuseTexture {
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl DiffuseTexture {
    /// Decode an uncompressed 24-bit Windows bitmap from disk and upload it.
    /// Header or format mismatches are reported, not recovered.
    pub fn load_bmp(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("loading texture {}", path.display());

        let data = std::fs::read(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        check_bmp_header(&data).with_context(|| format!("rejecting {}", path.display()))?;

        let decoded = image::load_from_memory_with_format(&data, image::ImageFormat::Bmp)
            .with_context(|| format!("could not decode {}", path.display()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self::from_pixels(device, queue, &rgba, width, height))
    }

    /// Upload already-decoded RGBA pixels.
    pub fn from_pixels(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("diffuse_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("diffuse_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        DiffuseTexture {
            bind_group_layout,
            bind_group,
        }
    }
}

/// BITMAPINFOHEADER fields: bits per pixel at byte 28, compression at byte 30.
/// Palette and RLE bitmaps would decode fine, but only plain 24-bit files are
/// accepted; anything else is rejected before decoding.
fn check_bmp_header(data: &[u8]) -> Result<()> {
    ensure!(
        data.len() >= 54 && data[..2] == *b"BM",
        "not a Windows bitmap"
    );
    let bit_count = u16::from_le_bytes([data[28], data[29]]);
    let compression = u32::from_le_bytes([data[30], data[31], data[32], data[33]]);
    ensure!(
        bit_count == 24,
        "expected a 24-bit bitmap, found {} bits per pixel",
        bit_count
    );
    ensure!(
        compression == 0,
        "expected an uncompressed bitmap, found compression mode {}",
        compression
    );
    Ok(())
}
