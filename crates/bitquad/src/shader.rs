//! WGSL generation for the quad grid
//!
//! The fragment stage has no integer operators to lean on, so the packed byte
//! arrives as `byte / 255` and is taken apart with floor and subtract. The
//! number of channels and their weights depend on the flag count, so the
//! decode routine is generated per count and fully unrolled:
//!
//! ```text
//! c0   = floor(e * 2)
//! c1   = floor(e * 4) - c0 * 2
//! c2   = floor(e * 8) - c0 * 4 - c1 * 2
//! rest = e * 8 - c0 * 4 - c1 * 2 - c2 * 1      (three flags)
//! ```
//!
//! Channels saturate at 1.0 and the remainder is clamped to [0, 1], matching
//! [`crate::codec::unpack`].

use std::fmt::Write;

use crate::codec::{FlagCount, COLOR_CHANNELS};
use crate::config::{ColorMode, GridConfig, Interpolation};

/// Vertex entry point name.
pub const VS_ENTRY: &str = "vs_main";

/// Fragment entry point name.
pub const FS_ENTRY: &str = "fs_main";

/// Vertex stage plus the shared varying struct.
pub fn vertex_source(interpolation: Interpolation) -> String {
    let qualifier = match interpolation {
        Interpolation::Flat => " @interpolate(flat)",
        Interpolation::Smooth => "",
    };

    format!(
        r#"struct VsOut {{
    @builtin(position) position: vec4<f32>,
    @location(0){qualifier} packed: f32,
}};

@vertex
fn {VS_ENTRY}(@location(0) position: vec3<f32>, @location(1) packed: vec4<f32>) -> VsOut {{
    var out: VsOut;
    out.position = vec4<f32>(position, 1.0);
    out.packed = packed.x;
    return out;
}}
"#
    )
}

/// `c0 * 4.0 - c1 * 2.0 ...` style subtraction of already-decoded channels.
fn subtract_prefix(expr: &mut String, channels: usize, top_weight: u32) {
    for j in 0..channels {
        let weight = 1u32 << (top_weight - j as u32);
        let _ = write!(expr, " - c{} * {}.0", j, weight);
    }
}

/// Unrolled `unpack_flags` for `n` flags.
pub fn unpack_function(n: FlagCount) -> String {
    let count = n.get();
    let mut src = String::from(
        "struct Unpacked {\n    flags: vec3<f32>,\n    rest: f32,\n};\n\nfn unpack_flags(encoded: f32) -> Unpacked {\n",
    );

    for k in 0..count {
        let mut expr = format!("floor(encoded * {}.0)", 1u32 << (k + 1));
        if k > 0 {
            subtract_prefix(&mut expr, k, k as u32);
        }
        let _ = writeln!(src, "    let c{} = min({}, 1.0);", k, expr);
    }

    let mut rest = format!("encoded * {}.0", 1u32 << count);
    if count > 0 {
        subtract_prefix(&mut rest, count, count as u32 - 1);
    }

    let rgb: Vec<String> = (0..COLOR_CHANNELS)
        .map(|k| {
            if k < count {
                format!("c{}", k)
            } else {
                "0.0".to_string()
            }
        })
        .collect();

    let _ = write!(
        src,
        "    var out: Unpacked;\n    out.flags = vec3<f32>({});\n    out.rest = clamp({}, 0.0, 1.0);\n    return out;\n}}\n",
        rgb.join(", "),
        rest
    );
    src
}

/// Fragment stage for `n` flags. Expects `VsOut` from [`vertex_source`].
pub fn fragment_source(n: FlagCount, mode: ColorMode) -> String {
    let color = match mode {
        ColorMode::Alpha => "vec4<f32>(decoded.flags, decoded.rest)",
        ColorMode::Grayscale => "vec4<f32>(decoded.flags * decoded.rest, 1.0)",
    };

    format!(
        r#"{unpack}
@fragment
fn {FS_ENTRY}(in: VsOut) -> @location(0) vec4<f32> {{
    let decoded = unpack_flags(in.packed);
    return {color};
}}
"#,
        unpack = unpack_function(n),
    )
}

/// Complete shader module for a config.
pub fn module_source(config: &GridConfig) -> String {
    format!(
        "{}\n{}",
        vertex_source(config.interpolation),
        fragment_source(config.flag_count, config.color_mode)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(count: usize) -> FlagCount {
        FlagCount::new(count).unwrap()
    }

    #[test]
    fn test_three_flag_decode_lines() {
        let src = unpack_function(n(3));
        assert!(src.contains("let c0 = min(floor(encoded * 2.0), 1.0);"));
        assert!(src.contains("let c1 = min(floor(encoded * 4.0) - c0 * 2.0, 1.0);"));
        assert!(src.contains("let c2 = min(floor(encoded * 8.0) - c0 * 4.0 - c1 * 2.0, 1.0);"));
        assert!(src.contains(
            "out.rest = clamp(encoded * 8.0 - c0 * 4.0 - c1 * 2.0 - c2 * 1.0, 0.0, 1.0);"
        ));
        assert!(src.contains("out.flags = vec3<f32>(c0, c1, c2);"));
    }

    #[test]
    fn test_zero_flag_decode() {
        let src = unpack_function(n(0));
        assert!(!src.contains("let c0"));
        assert!(src.contains("out.rest = clamp(encoded * 1.0, 0.0, 1.0);"));
        assert!(src.contains("out.flags = vec3<f32>(0.0, 0.0, 0.0);"));
    }

    #[test]
    fn test_channel_count_per_flag_count() {
        for count in 0..=8 {
            let src = unpack_function(n(count));
            assert_eq!(src.matches("    let c").count(), count, "count={}", count);
        }
    }

    #[test]
    fn test_one_flag_pads_color() {
        let src = unpack_function(n(1));
        assert!(src.contains("out.flags = vec3<f32>(c0, 0.0, 0.0);"));
        assert!(src.contains("out.rest = clamp(encoded * 2.0 - c0 * 1.0, 0.0, 1.0);"));
    }

    #[test]
    fn test_eight_flag_weights() {
        let src = unpack_function(n(8));
        assert!(src.contains("let c7 = min(floor(encoded * 256.0) - c0 * 128.0"));
        assert!(src.contains("clamp(encoded * 256.0 - c0 * 128.0"));
        assert!(src.contains("- c7 * 1.0, 0.0, 1.0);"));
    }

    #[test]
    fn test_interpolation_qualifier() {
        assert!(vertex_source(Interpolation::Flat).contains("@location(0) @interpolate(flat) packed: f32"));
        assert!(!vertex_source(Interpolation::Smooth).contains("@interpolate"));
    }

    #[test]
    fn test_color_modes() {
        let alpha = fragment_source(n(3), ColorMode::Alpha);
        assert!(alpha.contains("return vec4<f32>(decoded.flags, decoded.rest);"));
        let gray = fragment_source(n(3), ColorMode::Grayscale);
        assert!(gray.contains("return vec4<f32>(decoded.flags * decoded.rest, 1.0);"));
    }

    #[test]
    fn test_module_has_entry_points() {
        let src = module_source(&GridConfig::default());
        assert!(src.contains("fn vs_main("));
        assert!(src.contains("fn fs_main("));
    }

    #[test]
    fn test_generated_modules_validate() {
        for count in 0..=8 {
            for &mode in ColorMode::all() {
                for &interpolation in Interpolation::all() {
                    let config = GridConfig {
                        flag_count: n(count),
                        color_mode: mode,
                        interpolation,
                        ..GridConfig::default()
                    };
                    let src = module_source(&config);
                    let module = naga::front::wgsl::parse_str(&src)
                        .unwrap_or_else(|e| panic!("parse failed for {:?}: {}\n{}", config, e, src));
                    naga::valid::Validator::new(
                        naga::valid::ValidationFlags::all(),
                        naga::valid::Capabilities::empty(),
                    )
                    .validate(&module)
                    .unwrap_or_else(|e| panic!("validation failed for {:?}: {:?}", config, e));
                }
            }
        }
    }
}
