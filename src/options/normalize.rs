//! Splitting a free-form option set into layout and render options.

use tracing::warn;

use super::layout::LayoutOptions;
use super::render::RenderOptions;
use super::value::{OptionSet, OptionValue};
use crate::error::{ImagescError, Result};

/// How malformed option values are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Keep the value as given and warn
    Lenient,
    /// Fail with `InvalidOption`
    Strict,
}

/// Typed extraction of keys from an option set
pub(crate) struct OptionReader {
    options: OptionSet,
    mode: Mode,
    error: Option<ImagescError>,
}

impl OptionReader {
    pub(crate) fn new(options: OptionSet, mode: Mode) -> Self {
        Self {
            options,
            mode,
            error: None,
        }
    }

    /// Remove `key` and convert it, or return `default` when the key is
    /// absent.
    ///
    /// A value that does not convert also yields `default`. In strict mode
    /// the first such failure is reported by [`OptionReader::finish`]; in
    /// lenient mode the value goes back into the set untouched, so callers
    /// that forward the remaining keys still see it.
    pub(crate) fn take<T, F>(&mut self, key: &str, default: T, convert: F) -> T
    where
        F: Fn(&OptionValue) -> std::result::Result<T, String>,
    {
        let Some(value) = self.options.remove(key) else {
            return default;
        };

        match convert(&value) {
            Ok(converted) => converted,
            Err(message) => {
                match self.mode {
                    Mode::Strict => {
                        if self.error.is_none() {
                            self.error = Some(ImagescError::invalid_option(key, message));
                        }
                    }
                    Mode::Lenient => {
                        warn!(
                            option = key,
                            value = %value,
                            reason = %message,
                            "Unexpected option type, forwarding value as given"
                        );
                        self.options.insert(key, value);
                    }
                }
                default
            }
        }
    }

    /// Remove `key` without converting it
    pub(crate) fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.options.remove(key)
    }

    /// The keys not taken so far. Conversion failures are not reported.
    pub(crate) fn into_remaining(self) -> OptionSet {
        self.options
    }

    /// The keys not taken so far, or the first conversion failure.
    pub(crate) fn finish(self) -> Result<OptionSet> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.options),
        }
    }
}

/// Split `options` into render options and layout options.
///
/// Layout keys are consumed here and take their defaults when absent.
/// Reserved render keys get defaults only when absent; any other key is
/// passed through to the renderer unchanged. Malformed values never fail:
/// the typed field keeps its default, the value itself is kept as given
/// (in `RenderOptions::extra` or `LayoutOptions::unparsed`) and a warning
/// is logged.
pub fn normalize(options: &OptionSet) -> (RenderOptions, LayoutOptions) {
    let mut reader = OptionReader::new(options.clone(), Mode::Lenient);
    let layout = LayoutOptions::read(&mut reader);
    let mut render = RenderOptions::read(&mut reader);
    render.extra = reader.into_remaining();
    (render, layout)
}

/// Like [`normalize`], but rejects values of the wrong type or outside their
/// documented domain with [`ImagescError::InvalidOption`].
pub fn normalize_strict(options: &OptionSet) -> Result<(RenderOptions, LayoutOptions)> {
    let mut reader = OptionReader::new(options.clone(), Mode::Strict);
    let layout = LayoutOptions::read(&mut reader);
    let mut render = RenderOptions::read(&mut reader);
    render.extra = reader.finish()?;
    render.validate()?;
    Ok((render, layout))
}
