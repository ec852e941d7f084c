use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const PARAMETERS_KEY: &str = "parameters";
pub const NEGATIVE_PROMPT_MARKER: &str = "Negative prompt:";
const BREAK_MARKER: &str = "BREAK";
const INDENT: &str = "    ";

static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());
static REPEATED_COMMAS: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*,+").unwrap());

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a readable PNG: {source}")]
    Decoding {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub keyword: String,
    pub text: String,
}

/// Header attributes and text chunks of one PNG file.
#[derive(Debug, Clone)]
pub struct ImageMetadata {
    pub path: PathBuf,
    pub format: &'static str,
    pub width: u32,
    pub height: u32,
    pub mode: String,
    pub text: Vec<TextEntry>,
}

impl ImageMetadata {
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let file = File::open(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(path, BufReader::new(file))
    }

    /// Parses the header and every text chunk that precedes the image data.
    pub fn from_reader<R: Read>(path: &Path, reader: R) -> Result<Self, MetadataError> {
        let decoding = |source| MetadataError::Decoding {
            path: path.to_path_buf(),
            source,
        };
        let reader = png::Decoder::new(reader).read_info().map_err(decoding)?;
        let info = reader.info();

        let mut text = Vec::new();
        for chunk in &info.uncompressed_latin1_text {
            text.push(TextEntry {
                keyword: chunk.keyword.clone(),
                text: chunk.text.clone(),
            });
        }
        for chunk in &info.compressed_latin1_text {
            match chunk.get_text() {
                Ok(value) => text.push(TextEntry {
                    keyword: chunk.keyword.clone(),
                    text: value,
                }),
                Err(err) => tracing::warn!("Skipping zTXt chunk {}: {err}", chunk.keyword),
            }
        }
        for chunk in &info.utf8_text {
            match chunk.get_text() {
                Ok(value) => text.push(TextEntry {
                    keyword: chunk.keyword.clone(),
                    text: value,
                }),
                Err(err) => tracing::warn!("Skipping iTXt chunk {}: {err}", chunk.keyword),
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            format: "PNG",
            width: info.width,
            height: info.height,
            mode: mode_name(info.color_type, info.bit_depth).to_string(),
            text,
        })
    }

    /// Text of `keyword`. A keyword repeated across chunks resolves to the
    /// last one read, so `iTXt` overrides `zTXt`, which overrides `tEXt`.
    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.text
            .iter()
            .rfind(|entry| entry.keyword == keyword)
            .map(|entry| entry.text.as_str())
    }

    pub fn parameters(&self) -> Option<&str> {
        self.get(PARAMETERS_KEY)
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Text shown in the metadata panel.
    pub fn formatted(&self) -> String {
        let mut out = format!(
            "File name: {}\nFormat: {}\nSize: {}x{}\nMode: {}\nParameters:\n",
            self.file_name(),
            self.format,
            self.width,
            self.height,
            self.mode
        );

        match self.parameters().filter(|p| !p.trim().is_empty()) {
            Some(parameters) => out.push_str(&format_parameters(parameters)),
            None => out.push_str(&format!("{INDENT}(none)")),
        }

        let others: Vec<_> = self
            .text
            .iter()
            .filter(|entry| entry.keyword != PARAMETERS_KEY)
            .collect();
        if !others.is_empty() {
            out.push_str("\nOther chunks:");
            for entry in others {
                out.push_str(&format!(
                    "\n{INDENT}{}: {} chars",
                    entry.keyword,
                    entry.text.chars().count()
                ));
            }
        }
        out
    }
}

/// Conventional short name for a PNG pixel layout.
pub fn mode_name(color_type: png::ColorType, bit_depth: png::BitDepth) -> &'static str {
    use png::{BitDepth, ColorType};

    match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => "1",
        (ColorType::Grayscale, BitDepth::Sixteen) => "I;16",
        (ColorType::Grayscale, _) => "L",
        (ColorType::GrayscaleAlpha, _) => "LA",
        (ColorType::Rgb, _) => "RGB",
        (ColorType::Rgba, _) => "RGBA",
        (ColorType::Indexed, _) => "P",
    }
}

/// Re-wraps generation parameters one prompt term per line.
///
/// Everything from the negative prompt on is dropped. Commas inside
/// parentheses do not break lines.
pub fn format_parameters(raw: &str) -> String {
    let positive = match raw.split_once(NEGATIVE_PROMPT_MARKER) {
        Some((head, _)) => head.trim(),
        None => raw,
    };
    let collapsed = positive.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut protected = Vec::new();
    let masked = PARENTHESIZED.replace_all(&collapsed, |caps: &regex::Captures| {
        protected.push(caps[1].to_string());
        placeholder(protected.len() - 1)
    });
    let masked = REPEATED_COMMAS.replace_all(&masked, ",");

    let mut wrapped = masked
        .replace(',', ",\n")
        .replace(BREAK_MARKER, &format!("{BREAK_MARKER}\n\n"));
    for (idx, content) in protected.iter().enumerate() {
        wrapped = wrapped.replace(&placeholder(idx), &format!("({content})"));
    }

    wrapped
        .split('\n')
        .map(|line| format!("{INDENT}{}", line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn placeholder(idx: usize) -> String {
    format!("(__PAREN_{idx}__)")
}
