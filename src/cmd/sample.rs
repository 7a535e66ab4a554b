//! Sample command CLI handler.

use super::SampleArgs;
use line_sampler::records::Delimiter;
use line_sampler::sample::{self, SampleConfig, SampleFileConfig, DEFAULT_COUNT};

pub fn run(args: SampleArgs) -> anyhow::Result<()> {
    let progress = args.progress;
    let json = args.json;
    let config = resolve_config(args)?;

    let stats = sample::run(config)?;

    if progress {
        eprintln!();
        eprintln!("Sample Statistics:");
        let percent = if stats.records_seen > 0 {
            (stats.records_sampled as f64 / stats.records_seen as f64) * 100.0
        } else {
            0.0
        };
        eprintln!(
            "  Records: {} / {} ({:.1}%)",
            stats.records_sampled, stats.records_seen, percent
        );
        eprintln!("  Bytes read: {}", stats.bytes_read);
        eprintln!("  Compression: {}", stats.compression);
        eprintln!("  Seed: {}", stats.seed);
    }

    if json {
        eprintln!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}

/// Merge flags over the optional YAML config, over built-in defaults
pub(crate) fn resolve_config(args: SampleArgs) -> anyhow::Result<SampleConfig> {
    let file = match args.config {
        Some(ref path) => SampleFileConfig::load(path)?,
        None => SampleFileConfig::default(),
    };

    let nul = args.null || file.nul_delimiter.unwrap_or(false);
    let buffered = !args.no_buffer && file.buffered.unwrap_or(true);

    Ok(SampleConfig {
        input: args.input,
        output: args.output,
        count: args.count.or(file.count).unwrap_or(DEFAULT_COUNT),
        seed: args.seed.or(file.seed),
        delimiter: if nul { Delimiter::Nul } else { Delimiter::Newline },
        buffered,
        progress: args.progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults_without_config() {
        let config = resolve_config(SampleArgs::default()).unwrap();
        assert_eq!(config.count, DEFAULT_COUNT);
        assert_eq!(config.seed, None);
        assert_eq!(config.delimiter, Delimiter::Newline);
        assert!(config.buffered);
    }

    #[test]
    fn test_config_file_supplies_defaults() {
        let file = yaml_file("count: 7\nseed: 11\nnul_delimiter: true\nbuffered: false\n");
        let args = SampleArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let config = resolve_config(args).unwrap();
        assert_eq!(config.count, 7);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.delimiter, Delimiter::Nul);
        assert!(!config.buffered);
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = yaml_file("count: 7\nseed: 11\n");
        let args = SampleArgs {
            count: Some(2),
            seed: Some(5),
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let config = resolve_config(args).unwrap();
        assert_eq!(config.count, 2);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = SampleArgs {
            config: Some("/nonexistent/line-sampler.yaml".into()),
            ..Default::default()
        };
        assert!(resolve_config(args).is_err());
    }
}
