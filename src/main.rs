// SPDX-License-Identifier: MPL-2.0
use env_logger::{Builder, Target};
use log::LevelFilter;
use showcase_player::config;
use showcase_player::media::{resolve, PlaybackSource, ProjectMedia};
use showcase_player::ui::case_study::{HeadlessHost, State};
use showcase_player::video_player::MessageBus;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

const HELP: &str = "\
showcase_player

USAGE:
  showcase_player [OPTIONS] [REFERENCE]...

OPTIONS:
  -h, --help              Print this help
  --config-dir <DIR>      Directory holding settings.toml
  --project <FILE>        Mount a project record (JSON) and print its state

ARGS:
  <REFERENCE>             Video references to classify
";

struct Args {
    config_dir: Option<PathBuf>,
    project: Option<PathBuf>,
    references: Vec<String>,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("showcase_player", LevelFilter::Debug)
        .init();
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let config_dir = args.opt_value_from_str("--config-dir")?;
    let project = args.opt_value_from_str("--project")?;
    let references = utf8_references(args.finish());

    Ok(Some(Args {
        config_dir,
        project,
        references,
    }))
}

/// Keeps the references that are valid UTF-8 and warns about the rest.
fn utf8_references(raw: Vec<OsString>) -> Vec<String> {
    raw.into_iter()
        .filter_map(|arg| match arg.into_string() {
            Ok(reference) => Some(reference),
            Err(arg) => {
                log::warn!(
                    "Skipping reference that is not valid UTF-8: {}",
                    arg.to_string_lossy()
                );
                None
            }
        })
        .collect()
}

fn describe(reference: &str, muted: bool) {
    let source = resolve(Some(reference));
    match &source {
        PlaybackSource::DirectResource { url } => println!("{reference}: direct resource {url}"),
        PlaybackSource::RemoteEmbed { canonical_id } => {
            println!("{reference}: remote embed {canonical_id}");
            if let Some(url) = source.embed_url(muted) {
                println!("  embed: {url}");
            }
        }
        PlaybackSource::NoVideo => println!("{reference}: no video"),
    }
}

fn print_project(project: ProjectMedia, player: &config::PlayerConfig) {
    let bus = MessageBus::new();
    let mut host = HeadlessHost::default();
    let view = State::mount(project, player, &mut host, &bus, Instant::now());
    let playback = view.playback();

    println!("title: {}", view.title());
    println!("poster: {}", view.poster());
    println!("source: {:?}", view.source());
    if let Some(url) = view.embed_url() {
        println!("embed: {url}");
    }
    println!("phase: {:?}", view.phase());
    println!(
        "playing: {}, muted: {}, fullscreen: {}",
        playback.is_playing, playback.is_muted, playback.is_fullscreen
    );
    if let Some(label) = view.time_label() {
        println!("time: {label}");
    }
    println!(
        "gallery: {} images, {} thumbnails",
        view.gallery().len(),
        view.thumbnails().len()
    );
}

fn main() -> ExitCode {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprint!("{HELP}");
            return ExitCode::from(2);
        }
    };

    let (config, warning) = config::load_with_override(args.config_dir);
    if let Some(warning) = warning {
        log::warn!("{warning}");
    }

    for reference in &args.references {
        describe(reference, config.player.start_muted());
    }

    if let Some(path) = args.project {
        match ProjectMedia::load_from_path(&path) {
            Ok(project) => print_project(project, &config.player),
            Err(err) => {
                eprintln!("error: {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_references_keep_valid_arguments_in_order() {
        let raw = vec![OsString::from("clip.mp4"), OsString::from("https://youtu.be/x")];
        assert_eq!(utf8_references(raw), ["clip.mp4", "https://youtu.be/x"]);
    }

    #[cfg(unix)]
    #[test]
    fn utf8_references_skip_invalid_arguments() {
        use std::os::unix::ffi::OsStringExt;

        let raw = vec![
            OsString::from("first.mp4"),
            OsString::from_vec(vec![b'c', b'l', 0xff, b'p']),
            OsString::from("last.mp4"),
        ];
        assert_eq!(utf8_references(raw), ["first.mp4", "last.mp4"]);
    }
}
