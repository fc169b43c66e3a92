use web_sys::{WebGl2RenderingContext as GL, WebGlProgram, WebGlShader};

use super::assets::fetch_text;
use crate::error::{RefractError, Result, ShaderStage};

/// Fetches both shader stages, compiles, links and makes the program current.
pub async fn load_program(gl: &GL, vertex_uri: &str, fragment_uri: &str) -> Result<WebGlProgram> {
    let vertex_src = fetch_text(vertex_uri).await?;
    let vertex = compile_shader(gl, ShaderStage::Vertex, &vertex_src)?;
    let fragment_src = fetch_text(fragment_uri).await?;
    let fragment = compile_shader(gl, ShaderStage::Fragment, &fragment_src)?;

    let program = link_program(gl, &vertex, &fragment)?;
    gl.use_program(Some(&program));
    log::info!("shader program ready ({vertex_uri}, {fragment_uri})");
    Ok(program)
}

/// Compiles one stage; the driver's info log is returned verbatim on failure.
pub fn compile_shader(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader> {
    let kind = match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl
        .create_shader(kind)
        .ok_or("unable to create shader object")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(RefractError::ShaderCompile { stage, log })
    }
}

pub fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or("unable to create program object")?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(RefractError::ShaderLink { log })
    }
}
