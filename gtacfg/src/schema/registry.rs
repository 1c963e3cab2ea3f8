use std::{collections::HashMap, sync::LazyLock};

use crate::{data::model::root_segment, schema::SettingDefinition};

type Def = SettingDefinition;

const OFF_TO_ULTRA: &[&str] = &["Off", "Normal", "High", "Ultra"];
const NORMAL_TO_ULTRA: &[&str] = &["Normal", "High", "Ultra"];
const AUTO_TO_ULTRA: &[&str] = &["Auto", "Normal", "High", "Ultra"];
const ZERO_TO_THREE: &[&str] = &["0", "1", "2", "3"];
const ZERO_TO_TWO: &[&str] = &["0", "1", "2"];
const AUTO_TO_TWO: &[&str] = &["-1", "0", "1", "2"];
const MSAA_LEVELS: &[&str] = &["0", "2", "4", "8"];

static DEFINITIONS: &[(&str, SettingDefinition)] = &[
    // graphics
    ("graphics.Tessellation", Def::select_labeled("Tessellation", ZERO_TO_THREE, OFF_TO_ULTRA)),
    ("graphics.LodScale", Def::slider("Level of Detail Scaling", 0.0, 5.0, 0.01)),
    ("graphics.PedLodBias", Def::slider("Pedestrian LOD Bias", -1.0, 1.0, 0.01)),
    ("graphics.VehicleLodBias", Def::slider("Vehicle LOD Bias", -1.0, 1.0, 0.01)),
    ("graphics.ShadowQuality", Def::select_labeled("Shadow Quality", ZERO_TO_THREE, OFF_TO_ULTRA)),
    (
        "graphics.ReflectionQuality",
        Def::select_labeled("Reflection Quality", ZERO_TO_THREE, OFF_TO_ULTRA),
    ),
    (
        "graphics.ReflectionMSAA",
        Def::select_labeled("Reflection MSAA", MSAA_LEVELS, &["Off", "2x", "4x", "8x"]),
    ),
    ("graphics.SSAO", Def::select_labeled("SSAO", ZERO_TO_TWO, &["Off", "Low", "High"])),
    (
        "graphics.AnisotropicFiltering",
        Def::select("Anisotropic Filtering", &["0", "2", "4", "8", "16"]),
    ),
    ("graphics.MSAA", Def::select("MSAA", MSAA_LEVELS)),
    ("graphics.MSAAFragments", Def::number_input("MSAA Fragments").readonly()),
    ("graphics.MSAAQuality", Def::number_input("MSAA Quality").readonly()),
    ("graphics.SamplingMode", Def::number_input("Sampling Mode").readonly()),
    (
        "graphics.TextureQuality",
        Def::select_labeled("Texture Quality", ZERO_TO_TWO, NORMAL_TO_ULTRA),
    ),
    (
        "graphics.ParticleQuality",
        Def::select_labeled("Particle Quality", AUTO_TO_TWO, AUTO_TO_ULTRA),
    ),
    ("graphics.WaterQuality", Def::select_labeled("Water Quality", AUTO_TO_TWO, AUTO_TO_ULTRA)),
    ("graphics.GrassQuality", Def::select_labeled("Grass Quality", ZERO_TO_TWO, NORMAL_TO_ULTRA)),
    ("graphics.ShaderQuality", Def::select_labeled("Shader Quality", ZERO_TO_TWO, NORMAL_TO_ULTRA)),
    (
        "graphics.Shadow_SoftShadows",
        Def::select_labeled("Soft Shadows", ZERO_TO_TWO, &["Sharp", "Soft", "Softer"]),
    ),
    ("graphics.UltraShadows_Enabled", Def::switch("Ultra Shadows")),
    ("graphics.Shadow_ParticleShadows", Def::switch("Particle Shadows")),
    ("graphics.Shadow_Distance", Def::slider("Shadow Distance", 0.0, 2.0, 0.01)),
    ("graphics.Shadow_LongShadows", Def::switch("Long Shadows")),
    (
        "graphics.Shadow_SplitZStart",
        Def::slider("Shadow Split Z Start", -5.0, 5.0, 0.01).readonly(),
    ),
    (
        "graphics.Shadow_SplitZEnd",
        Def::slider("Shadow Split Z End", -5.0, 5.0, 0.01).readonly(),
    ),
    (
        "graphics.Shadow_aircraftExpWeight",
        Def::slider("Aircraft Exp. Weight", -5.0, 5.0, 0.01).readonly(),
    ),
    (
        "graphics.Shadow_DisableScreenSizeCheck",
        Def::switch("Disable Screen Size Check").readonly(),
    ),
    ("graphics.Reflection_MipBlur", Def::switch("Reflection Mip Blur")),
    ("graphics.FXAA_Enabled", Def::switch("FXAA Enabled")),
    ("graphics.TXAA_Enabled", Def::switch("TXAA Enabled")),
    ("graphics.Lighting_FogVolumes", Def::switch("Lighting Fog Volumes")),
    ("graphics.Shader_SSA", Def::switch("Shader SSA")),
    ("graphics.DX_Version", Def::text("DirectX Version").readonly()),
    ("graphics.CityDensity", Def::slider("City Density", 0.0, 1.0, 0.01)),
    (
        "graphics.PedVarietyMultiplier",
        Def::slider("Pedestrian Variety Multiplier", -10.0, 10.0, 0.1),
    ),
    (
        "graphics.VehicleVarietyMultiplier",
        Def::slider("Vehicle Variety Multiplier", -10.0, 10.0, 0.1),
    ),
    ("graphics.PostFX", Def::select_labeled("Post FX", ZERO_TO_TWO, &["Off", "Normal", "High"])),
    ("graphics.DoF", Def::switch("Depth of Field")),
    ("graphics.HdStreamingInFlight", Def::switch("HD Streaming In Flight")),
    ("graphics.MaxLodScale", Def::slider("Max LOD Scale", -1.0, 1.0, 0.01)),
    ("graphics.MotionBlurStrength", Def::slider("Motion Blur Strength", 0.0, 1.0, 0.01)),
    // system
    ("system.numBytesPerReplayBlock", Def::text("Bytes Per Replay Block").readonly()),
    ("system.numReplayBlocks", Def::text("Number of Replay Blocks").readonly()),
    ("system.maxSizeOfStreamingReplay", Def::text("Max Streaming Replay Size").readonly()),
    ("system.maxFileStoreSize", Def::text("Max File Store Size").readonly()),
    // audio
    ("audio.Audio3d", Def::switch("3D Audio")),
    // video
    ("video.AdapterIndex", Def::text("Adapter Index").readonly()),
    ("video.OutputIndex", Def::text("Output Index").readonly()),
    ("video.ScreenWidth", Def::text("Screen Width").readonly()),
    ("video.ScreenHeight", Def::text("Screen Height").readonly()),
    ("video.RefreshRate", Def::text("Refresh Rate").readonly()),
    (
        "video.Windowed",
        Def::select_labeled(
            "Window Mode",
            ZERO_TO_TWO,
            &["Fullscreen", "Windowed", "Borderless Windowed"],
        ),
    ),
    ("video.VSync", Def::select_labeled("V-Sync", ZERO_TO_TWO, &["Off", "On", "Half"])),
    ("video.Stereo", Def::text("Stereo").readonly()),
    ("video.Convergence", Def::slider("Convergence", 0.0, 1.0, 0.001)),
    ("video.Separation", Def::slider("Separation", -2.0, 2.0, 0.001)),
    ("video.PauseOnFocusLoss", Def::switch("Pause On Focus Loss")),
    (
        "video.AspectRatio",
        Def::select_labeled(
            "Aspect Ratio",
            &["0", "1", "2", "3", "4"],
            &["Auto", "4:3", "5:4", "16:9", "16:10"],
        ),
    ),
    // top level
    ("VideoCardDescription", Def::text("Video Card").readonly()),
    ("version", Def::text("Version").readonly()),
    ("configSource", Def::text("Config Source").readonly()),
];

static REGISTRY: LazyLock<HashMap<&'static str, &'static SettingDefinition>> =
    LazyLock::new(|| DEFINITIONS.iter().map(|(path, def)| (*path, def)).collect());

/// Definition registered for `path`, if any.
pub fn lookup(path: &str) -> Option<&'static SettingDefinition> {
    REGISTRY.get(path).copied()
}

/// All registered definitions in table order.
pub fn definitions() -> impl Iterator<Item = (&'static str, &'static SettingDefinition)> {
    DEFINITIONS.iter().map(|(path, def)| (*path, def))
}

/// Name of the section a group of settings is listed under.
pub const OTHER_SECTION: &str = "Other Settings";

/// Section for `path`, chosen by its first segment.
pub fn section_for(path: &str) -> &'static str {
    match root_segment(path) {
        "graphics" => "Graphics Settings",
        "system" => "System Settings",
        "audio" => "Audio Settings",
        "video" => "Video Settings",
        "VideoCardDescription" => "Hardware Info",
        "version" | "configSource" => "General",
        _ => OTHER_SECTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Control;

    #[test]
    fn test_lookup() {
        let def = lookup("graphics.Tessellation").unwrap();
        assert_eq!(def.label, "Tessellation");
        assert!(matches!(def.control, Control::Select { .. }));
        assert!(lookup("graphics.Unknown").is_none());
        assert!(lookup("Tessellation").is_none());
    }

    #[test]
    fn test_paths_are_unique() {
        assert_eq!(REGISTRY.len(), DEFINITIONS.len());
    }

    #[test]
    fn test_select_labels_match_options() {
        for (path, def) in definitions() {
            if let Control::Select {
                options,
                labels: Some(labels),
            } = def.control
            {
                assert_eq!(options.len(), labels.len(), "{path}");
            }
        }
    }

    #[test]
    fn test_sliders_are_well_formed() {
        for (path, def) in definitions() {
            if let Control::Slider { min, max, step } = def.control {
                assert!(min < max && step > 0.0, "{path}");
            }
        }
    }

    #[test]
    fn test_section_for() {
        assert_eq!(section_for("graphics.MSAA"), "Graphics Settings");
        assert_eq!(section_for("video"), "Video Settings");
        assert_eq!(section_for("VideoCardDescription"), "Hardware Info");
        assert_eq!(section_for("configSource"), "General");
        assert_eq!(section_for("mods.enabled"), OTHER_SECTION);
    }
}
