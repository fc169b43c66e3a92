use web_sys::{WebGl2RenderingContext as GL, WebGlTexture, WebGlUniformLocation};

use crate::crop::CroppedFrame;
use crate::error::Result;

/// A texture object bound to one numbered texture unit.
///
/// Sampling is fixed: clamp-to-edge on both axes, nearest filtering, no
/// mipmaps. The texture object is created once; uploads only replace its
/// contents.
pub struct TextureUnit {
    unit: u32,
    texture: WebGlTexture,
}

impl TextureUnit {
    /// Allocates the texture on `unit` and points the sampler uniform at it.
    pub fn bind(gl: &GL, unit: u32, sampler: Option<&WebGlUniformLocation>) -> Result<Self> {
        let texture = gl.create_texture().ok_or("unable to create texture")?;
        gl.active_texture(GL::TEXTURE0 + unit);
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::NEAREST as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::NEAREST as i32);
        gl.uniform1i(sampler, unit as i32);
        Ok(Self { unit, texture })
    }

    pub fn unit(&self) -> u32 {
        self.unit
    }

    pub fn texture(&self) -> &WebGlTexture {
        &self.texture
    }

    /// Re-specifies the texture image as RGBA8 from `frame`.
    pub fn upload(&self, gl: &GL, frame: &CroppedFrame) -> Result<()> {
        gl.active_texture(GL::TEXTURE0 + self.unit);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA8 as i32,
            frame.width() as i32,
            frame.height() as i32,
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            Some(frame.as_bytes()),
        )?;
        Ok(())
    }
}
