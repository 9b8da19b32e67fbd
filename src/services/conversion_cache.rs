use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use oklch_gamut::{convert_with_outcome, Color, ColorKey, EncodedValue, FitOutcome, Representation};

/// Turns a color into an encoded value. The seam the cache wraps.
pub trait Converter {
    fn convert(&self, color: &Color, representation: Representation) -> EncodedValue;
}

/// Default chroma loss above which a fit is logged as a warning.
pub const DEFAULT_CHROMA_WARNING: f64 = 0.05;

/// Gamut-fitting converter that logs lossy fits.
#[derive(Debug, Clone, Copy)]
pub struct GamutConverter {
    /// Chroma loss that triggers a warning
    pub chroma_warning: f64,
}

impl Default for GamutConverter {
    fn default() -> Self {
        Self {
            chroma_warning: DEFAULT_CHROMA_WARNING,
        }
    }
}

impl Converter for GamutConverter {
    fn convert(&self, color: &Color, representation: Representation) -> EncodedValue {
        let conversion = convert_with_outcome(color, representation);

        match conversion.outcome {
            Some(FitOutcome::ChromaReduced { original, fitted }) => {
                if original - fitted > self.chroma_warning {
                    tracing::warn!(
                        color = %color,
                        %representation,
                        original,
                        fitted,
                        "Large chroma reduction to fit gamut"
                    );
                } else {
                    tracing::debug!(color = %color, %representation, original, fitted, "Fitted to gamut");
                }
            }
            Some(FitOutcome::LightnessClamped {
                original_lightness,
                fitted_lightness,
            }) => {
                tracing::warn!(
                    color = %color,
                    %representation,
                    original_lightness,
                    fitted_lightness,
                    "Lightness clamped, color is outside gamut even at zero chroma"
                );
            }
            Some(FitOutcome::InGamut) | None => {}
        }

        conversion.value
    }
}

/// Hit and miss counts of a [`ConversionCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// Memoizes conversions, keyed by the exact color value and representation.
///
/// One cache per build. There is no eviction: a build touches a few dozen
/// colors in a handful of representations.
pub struct ConversionCache<C: Converter = GamutConverter> {
    converter: C,
    entries: RwLock<HashMap<(ColorKey, Representation), EncodedValue>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ConversionCache {
    pub fn new() -> Self {
        Self::with_converter(GamutConverter::default())
    }
}

impl Default for ConversionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Converter> ConversionCache<C> {
    pub fn with_converter(converter: C) -> Self {
        Self {
            converter,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Return the cached value, converting on first use.
    ///
    /// The underlying converter runs at most once per key, even when
    /// called from several threads.
    pub fn get_or_compute(&self, color: &Color, representation: Representation) -> EncodedValue {
        let key = (color.key(), representation);

        if let Some(value) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *value;
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *value;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = self.converter.convert(color, representation);
        entries.insert(key, value);
        value
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.read().unwrap_or_else(PoisonError::into_inner).len(),
        }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Counts calls to the wrapped conversion
    #[derive(Default)]
    struct CountingConverter {
        calls: AtomicUsize,
    }

    impl Converter for CountingConverter {
        fn convert(&self, color: &Color, representation: Representation) -> EncodedValue {
            self.calls.fetch_add(1, Ordering::SeqCst);
            oklch_gamut::convert(color, representation)
        }
    }

    #[test]
    fn test_second_lookup_is_a_hit() {
        let cache = ConversionCache::with_converter(CountingConverter::default());
        let red = Color::new(0.6, 0.2, 30.0);

        let first = cache.get_or_compute(&red, Representation::Hex);
        let second = cache.get_or_compute(&red, Representation::Hex);

        assert_eq!(first, second);
        assert_eq!(cache.converter().calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_key_includes_representation_and_alpha() {
        let cache = ConversionCache::with_converter(CountingConverter::default());
        let red = Color::new(0.6, 0.2, 30.0);

        cache.get_or_compute(&red, Representation::Hex);
        cache.get_or_compute(&red, Representation::Css);
        cache.get_or_compute(&red.with_alpha(0.5), Representation::Hex);

        assert_eq!(cache.converter().calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.stats().entries, 3);
    }

    #[test]
    fn test_changed_color_is_not_stale() {
        let cache = ConversionCache::new();
        let red = Color::new(0.6, 0.2, 30.0);
        let darker = red.with_lightness_chroma(0.4, 0.2);

        let a = cache.get_or_compute(&red, Representation::Hex);
        let b = cache.get_or_compute(&darker, Representation::Hex);
        assert_ne!(a, b);
    }

    #[test]
    fn test_equal_hues_share_entries() {
        let cache = ConversionCache::with_converter(CountingConverter::default());
        cache.get_or_compute(&Color::new(0.6, 0.2, 390.0), Representation::Hex);
        cache.get_or_compute(&Color::new(0.6, 0.2, 30.0), Representation::Hex);
        assert_eq!(cache.converter().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_access_computes_once() {
        let cache = Arc::new(ConversionCache::with_converter(CountingConverter::default()));
        let color = Color::new(0.7, 0.3, 145.0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.get_or_compute(&color, Representation::DisplayP3))
            })
            .collect();
        let values: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(values.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.converter().calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 7);
    }

    /// Formatted log output, shared with the subscriber's writer
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run one conversion and return what it logged at debug and above.
    fn logged(converter: GamutConverter, color: Color, representation: Representation) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            converter.convert(&color, representation);
        });

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_large_chroma_loss_warns() {
        let vivid = Color::new(0.6, 0.4, 140.0);
        let output = logged(GamutConverter { chroma_warning: 0.05 }, vivid, Representation::Hex);
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("Large chroma reduction to fit gamut"), "{output}");
    }

    #[test]
    fn test_small_chroma_loss_is_debug() {
        let vivid = Color::new(0.6, 0.4, 140.0);
        let output = logged(GamutConverter { chroma_warning: 0.5 }, vivid, Representation::Hex);
        assert!(output.contains("DEBUG"), "{output}");
        assert!(output.contains("Fitted to gamut"), "{output}");
        assert!(!output.contains("WARN"), "{output}");
    }

    #[test]
    fn test_lightness_fallback_always_warns() {
        let too_bright = Color::new(1.2, 0.1, 90.0);
        let output = logged(GamutConverter { chroma_warning: 10.0 }, too_bright, Representation::Hex);
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("Lightness clamped"), "{output}");
    }

    #[test]
    fn test_in_gamut_is_silent() {
        let red = Color::new(0.6, 0.2, 30.0);
        let output = logged(GamutConverter::default(), red, Representation::Hex);
        assert!(output.is_empty(), "{output}");
    }
}
