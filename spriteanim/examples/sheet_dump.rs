use serde_json::json;
use spriteanim::{
    ArchiveEntries, DEFAULT_CLIP_FRAME_RATE, ImportConfig, ImportInput, ImportJob,
    ImporterRegistry, NamingScheme, import_sheet,
};
use std::path::{Path, PathBuf};

fn parse_scheme(name: &str) -> NamingScheme {
    NamingScheme::ALL
        .into_iter()
        .find(|s| format!("{s:?}").eq_ignore_ascii_case(name))
        .unwrap_or_else(|| panic!("unknown naming scheme `{name}`"))
}

/// An extracted `.pyxel` archive: every file in the directory becomes an entry.
fn read_extracted_archive(dir: &Path) -> ArchiveEntries {
    std::fs::read_dir(dir)
        .expect("read archive dir")
        .map(|entry| {
            let entry = entry.expect("dir entry");
            let name = entry.file_name().to_string_lossy().into_owned();
            let bytes = std::fs::read(entry.path()).expect("read entry");
            (name, bytes)
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut positional = Vec::<String>::new();
    let mut config = ImportConfig::default();
    let mut frame_rate = DEFAULT_CLIP_FRAME_RATE;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--scheme" => {
                config.naming_scheme = parse_scheme(args.get(i + 1).expect("--scheme value"));
                i += 2;
            }
            "--frame-rate" => {
                frame_rate = args
                    .get(i + 1)
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CLIP_FRAME_RATE);
                i += 2;
            }
            "--non-looping" => {
                config.non_looping_animations = args
                    .get(i + 1)
                    .map(|v| v.split(',').map(str::to_string).collect())
                    .unwrap_or_default();
                i += 2;
            }
            other => {
                positional.push(other.to_string());
                i += 1;
            }
        }
    }

    let input_path = positional
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./assets/hero.json"));

    let registry = ImporterRegistry::with_builtin_importers();
    let json_text;
    let entries;
    let (job, input) = if input_path.is_dir() {
        entries = read_extracted_archive(&input_path);
        (
            ImportJob::new(input_path.with_extension("pyxel")),
            ImportInput::Archive(&entries),
        )
    } else {
        json_text = std::fs::read_to_string(&input_path).expect("read json");
        (
            ImportJob::new(input_path.with_extension("ase")),
            ImportInput::Json(&json_text),
        )
    };

    let outcome = import_sheet(&registry, &job, input, &config).expect("import");
    let sheet = outcome.sheet();

    let frames: Vec<_> = sheet
        .frames
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "rect": [f.rect.x, f.rect.y, f.rect.width, f.rect.height],
                "duration": f.duration,
            })
        })
        .collect();

    let animations: Vec<_> = sheet
        .animations
        .iter()
        .map(|a| {
            json!({
                "name": a.name,
                "category": a.is_category,
                "looping": a.is_looping,
                "frames": [a.frames.start, a.frames.end],
                "keyTimes": a.key_times.as_slice(),
            })
        })
        .collect();

    let clips: Vec<_> = sheet
        .clip_plans(&job.animations_directory(&config), job.name(), &config, frame_rate)
        .into_iter()
        .map(|plan| {
            let keyframes: Vec<_> = plan
                .keyframes
                .iter()
                .map(|k| json!([k.time, k.frame]))
                .collect();
            json!({
                "path": plan.path.display().to_string(),
                "target": format!("{:?}", plan.target),
                "keyframes": keyframes,
            })
        })
        .collect();

    let out = json!({
        "name": sheet.name,
        "size": [sheet.layout.width, sheet.layout.height],
        "hasAnimations": outcome.has_animations(),
        "customPivot": sheet.layout.custom_pivot.map(|p| [p.x, p.y]),
        "frames": frames,
        "animations": animations,
        "clips": clips,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).expect("serialize output")
    );
}
