/// WGSL shader for the terrain grid.
///
/// The vertex stage displaces the flat grid with fBm value noise and derives
/// a normal by finite differences; the fragment stage colours by height.
/// `TerrainUniforms` must stay in sync with `dirtjam_render::TerrainUniforms`.
pub const TERRAIN_SHADER: &str = r#"
struct TerrainUniforms {
    mvp: mat4x4<f32>,
    low_color: vec4<f32>,
    high_color: vec4<f32>,
    amplitude: f32,
    frequency: f32,
    octaves: u32,
    shading_mode: u32,
};

@group(0) @binding(0)
var<uniform> params: TerrainUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) height: f32,
    @location(1) normal: vec3<f32>,
};

fn hash2(p: vec2<f32>) -> f32 {
    let h = dot(p, vec2<f32>(127.1, 311.7));
    return fract(sin(h) * 43758.5453);
}

fn value_noise(p: vec2<f32>) -> f32 {
    let i = floor(p);
    let f = fract(p);
    let u = f * f * (3.0 - 2.0 * f);
    let a = hash2(i);
    let b = hash2(i + vec2<f32>(1.0, 0.0));
    let c = hash2(i + vec2<f32>(0.0, 1.0));
    let d = hash2(i + vec2<f32>(1.0, 1.0));
    return mix(mix(a, b, u.x), mix(c, d, u.x), u.y);
}

fn fbm(p: vec2<f32>) -> f32 {
    var value = 0.0;
    var amp = 0.5;
    var freq = 1.0;
    for (var i = 0u; i < params.octaves; i = i + 1u) {
        value += amp * value_noise(p * freq);
        freq *= 2.0;
        amp *= 0.5;
    }
    return value;
}

fn terrain_height(xz: vec2<f32>) -> f32 {
    return fbm(xz * params.frequency) * params.amplitude;
}

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let xz = vertex.position.xz;
    let h = terrain_height(xz);
    let e = 0.01;
    let hx = terrain_height(xz + vec2<f32>(e, 0.0));
    let hz = terrain_height(xz + vec2<f32>(0.0, e));

    var out: VertexOutput;
    out.clip_position = params.mvp * vec4<f32>(vertex.position.x, h, vertex.position.z, 1.0);
    out.height = h / max(params.amplitude, 0.0001);
    out.normal = normalize(vec3<f32>(h - hx, e, h - hz));
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let t = clamp(in.height, 0.0, 1.0);
    let base = mix(params.low_color.rgb, params.high_color.rgb, t);
    let n = normalize(in.normal);

    var color = base;
    switch params.shading_mode {
        case 1u: {
            color = n * 0.5 + vec3<f32>(0.5);
        }
        case 2u: {
            color = base;
        }
        default: {
            let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
            let ambient = 0.3;
            let diffuse = max(dot(n, light_dir), 0.0);
            color = base * (ambient + diffuse * 0.7);
        }
    }
    return vec4<f32>(color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_declares_entry_points_and_uniforms() {
        assert!(TERRAIN_SHADER.contains("fn vs_main"));
        assert!(TERRAIN_SHADER.contains("fn fs_main"));
        assert!(TERRAIN_SHADER.contains("@location(0) position: vec3<f32>"));
        assert!(TERRAIN_SHADER.contains("shading_mode: u32"));
    }
}
