//! This module is the stateful side of the crate: one [`Session`] holds the current spectrum, observer,
//! illuminant and settings, and answers "what color is this?" for whatever intensity the user has
//! chosen. A host application drives it from its own widgets and, once the user is happy, hands the
//! final color to a [`SwatchSink`].
//!
//! Every setter builds the complete new state before touching the session. If anything fails (a
//! missing file, a wrong delimiter, an unknown observer) the error comes back and the session is
//! exactly as it was.

use std::fs;
use std::path::Path;

use crate::color::{RGBColor, XYZColor};
use crate::dataset::SpectralDataset;
use crate::error::SpectrumError;
use crate::illuminants::{illuminant_from_table, Illuminant};
use crate::integrate::{tristimulus, SpectrumType};
use crate::observer::ObserverFunctions;
use crate::resample::{resample, ResampledCurve};
use crate::saturation::{solve, Saturation};
use crate::settings::ConversionSettings;
use crate::space::{ColorSpace, GamutMapping};
use crate::table::{parse_delimited, Delimiter};

/// The name of the spectrum a session starts with.
pub const SAMPLE_SPECTRUM_NAME: &str = "Sample grey";

/// Whatever the host uses to store colors: a document's swatch panel, a palette file, a test double.
/// The session only ever hands it a name and an 8-bit RGB triple.
pub trait SwatchSink {
    /// Creates (or replaces) a swatch called `name`.
    fn emit(&mut self, name: &str, rgb: [u8; 3]);
}

// Where the current spectrum came from. The raw text is kept so a delimiter change can re-read it.
#[derive(Debug, Clone, PartialEq)]
struct SpectrumSource {
    name: String,
    text: Option<String>,
}

impl SpectrumSource {
    fn sample() -> SpectrumSource {
        SpectrumSource {
            name: SAMPLE_SPECTRUM_NAME.to_owned(),
            text: None,
        }
    }

    // The sample spectrum is a flat absorbance of 1: a neutral grey at any intensity.
    fn resample(&self, settings: &ConversionSettings) -> Result<ResampledCurve, SpectrumError> {
        match self.text {
            Some(ref text) => {
                let table = parse_delimited(text, settings.delimiter)?;
                resample(&table, 0, 1, settings.grid)
            }
            None => {
                settings.grid.validate()?;
                Ok(ResampledCurve::constant(settings.grid, 1.0))
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// A spectrum being turned into a swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    settings: ConversionSettings,
    source: SpectrumSource,
    dataset: SpectralDataset,
    saturation: Saturation,
    factor: f64,
}

impl Session {
    /// Starts a session with the built-in observer and illuminant named in `settings` and the sample
    /// grey spectrum.
    pub fn new(settings: ConversionSettings) -> Result<Session, SpectrumError> {
        settings.grid.validate()?;
        let source = SpectrumSource::sample();
        let spectrum = source.resample(&settings)?;
        let observer = ObserverFunctions::builtin(&settings.observer, settings.grid)?;
        let illuminant = settings.illuminant.spectrum(settings.grid)?;
        let dataset = SpectralDataset::new(spectrum, observer, illuminant)?;
        Ok(Session::calibrated(settings, source, dataset))
    }

    // The single place new state is assembled. Saturation is always recomputed and the intensity
    // reset to its default.
    fn calibrated(
        settings: ConversionSettings,
        source: SpectrumSource,
        dataset: SpectralDataset,
    ) -> Session {
        let saturation = solve(
            &dataset,
            settings.spectrum_type,
            &settings.color_space,
            settings.iterations,
        );
        debug!(
            spectrum = %source.name,
            max = saturation.max,
            factor = saturation.default_factor,
            "session rebuilt"
        );
        Session {
            settings,
            source,
            factor: saturation.default_factor,
            saturation,
            dataset,
        }
    }

    fn commit(&mut self, settings: ConversionSettings, source: SpectrumSource, dataset: SpectralDataset) {
        *self = Session::calibrated(settings, source, dataset);
    }

    /// Replaces the spectrum with delimited text, named `name`. Column 0 is wavelength, column 1 the
    /// value.
    pub fn set_spectrum_text(&mut self, name: &str, text: &str) -> Result<(), SpectrumError> {
        let source = SpectrumSource {
            name: name.to_owned(),
            text: Some(text.to_owned()),
        };
        let dataset = self.dataset.with_spectrum(source.resample(&self.settings)?)?;
        self.commit(self.settings.clone(), source, dataset);
        Ok(())
    }

    /// Reads the spectrum from a file. The swatch is named after the file.
    pub fn load_spectrum<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SpectrumError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        self.set_spectrum_text(&file_name(path), &text)
    }

    /// Switches to another built-in observer.
    pub fn select_observer(&mut self, name: &str) -> Result<(), SpectrumError> {
        let observer = ObserverFunctions::builtin(name, self.settings.grid)?;
        self.replace_observer(observer, Some(name))
    }

    /// Replaces the observer with one read from delimited text with four columns: wavelength, X̄, Ȳ, Z̄.
    pub fn set_observer_text(&mut self, text: &str) -> Result<(), SpectrumError> {
        let table = parse_delimited(text, self.settings.delimiter)?;
        let observer = ObserverFunctions::from_table(&table, self.settings.grid)?;
        self.replace_observer(observer, None)
    }

    /// Reads the observer from a file.
    pub fn load_observer<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SpectrumError> {
        let text = fs::read_to_string(path)?;
        self.set_observer_text(&text)
    }

    fn replace_observer(
        &mut self,
        observer: ObserverFunctions,
        name: Option<&str>,
    ) -> Result<(), SpectrumError> {
        let dataset = SpectralDataset::new(
            self.dataset.spectrum().clone(),
            observer,
            self.dataset.illuminant().clone(),
        )?;
        let mut settings = self.settings.clone();
        if let Some(name) = name {
            settings.observer = name.to_owned();
        }
        self.commit(settings, self.source.clone(), dataset);
        Ok(())
    }

    /// Switches to another built-in illuminant.
    pub fn select_illuminant(&mut self, illuminant: Illuminant) -> Result<(), SpectrumError> {
        let spd = illuminant.spectrum(self.settings.grid)?;
        let mut settings = self.settings.clone();
        settings.illuminant = illuminant;
        self.replace_illuminant(settings, spd)
    }

    /// Replaces the illuminant with one read from delimited text: wavelength, relative power.
    pub fn set_illuminant_text(&mut self, text: &str) -> Result<(), SpectrumError> {
        let table = parse_delimited(text, self.settings.delimiter)?;
        let spd = illuminant_from_table(&table, self.settings.grid)?;
        self.replace_illuminant(self.settings.clone(), spd)
    }

    /// Reads the illuminant from a file.
    pub fn load_illuminant<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SpectrumError> {
        let text = fs::read_to_string(path)?;
        self.set_illuminant_text(&text)
    }

    fn replace_illuminant(
        &mut self,
        settings: ConversionSettings,
        illuminant: ResampledCurve,
    ) -> Result<(), SpectrumError> {
        let dataset = SpectralDataset::new(
            self.dataset.spectrum().clone(),
            self.dataset.observer().clone(),
            illuminant,
        )?;
        self.commit(settings, self.source.clone(), dataset);
        Ok(())
    }

    /// Changes the delimiter and re-reads the current spectrum with it.
    pub fn set_delimiter(&mut self, delimiter: Delimiter) -> Result<(), SpectrumError> {
        let mut settings = self.settings.clone();
        settings.delimiter = delimiter;
        let dataset = self.dataset.with_spectrum(self.source.resample(&settings)?)?;
        self.commit(settings, self.source.clone(), dataset);
        Ok(())
    }

    /// Changes between absorption and emission.
    pub fn set_spectrum_type(&mut self, kind: SpectrumType) {
        let mut settings = self.settings.clone();
        settings.spectrum_type = kind;
        self.commit(settings, self.source.clone(), self.dataset.clone());
    }

    /// Changes the target RGB space.
    pub fn set_color_space(&mut self, space: ColorSpace) {
        let mut settings = self.settings.clone();
        settings.color_space = space;
        self.commit(settings, self.source.clone(), self.dataset.clone());
    }

    /// Sets the intensity factor, clamped to `[0, max_saturation]`. Returns the value actually used.
    pub fn set_factor(&mut self, factor: f64) -> f64 {
        self.factor = factor.max(0.0).min(self.saturation.max);
        self.factor
    }

    /// Overrides the swatch name, or goes back to the spectrum's name with `None`.
    pub fn set_swatch_name(&mut self, name: Option<String>) {
        self.settings.swatch_name = name;
    }

    /// The current settings.
    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// The current dataset.
    pub fn dataset(&self) -> &SpectralDataset {
        &self.dataset
    }

    /// The calibrated intensity range.
    pub fn saturation(&self) -> Saturation {
        self.saturation
    }

    /// The current intensity factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// The name the swatch will get.
    pub fn swatch_name(&self) -> &str {
        self.settings
            .swatch_name
            .as_ref()
            .map_or(self.source.name.as_str(), String::as_str)
    }

    /// The XYZ color at the current intensity.
    pub fn xyz(&self) -> XYZColor {
        tristimulus(&self.dataset, self.settings.spectrum_type, self.factor)
    }

    /// The color at the current intensity, mapped into the target space, with its clipping flags.
    pub fn mapping(&self) -> GamutMapping {
        self.settings.color_space.map(self.xyz())
    }

    /// The color at the current intensity as floats in `[0, 1]`, for previews.
    pub fn preview(&self) -> RGBColor {
        self.mapping().rgb
    }

    /// The color at the current intensity as 0–255 integers, for swatches.
    pub fn swatch(&self) -> [u8; 3] {
        self.preview().normalized()
    }

    /// Hands the current swatch to the host.
    pub fn emit_swatch(&self, sink: &mut dyn SwatchSink) {
        let rgb = self.swatch();
        debug!(swatch = self.swatch_name(), ?rgb, "emitting swatch");
        sink.emit(self.swatch_name(), rgb);
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use std::env;
    use std::path::PathBuf;

    const THREE_POINTS: &str = "380,0.1\n580,0.2\n780,0.1\n";

    #[derive(Default)]
    struct Recorder {
        swatches: Vec<(String, [u8; 3])>,
    }

    impl SwatchSink for Recorder {
        fn emit(&mut self, name: &str, rgb: [u8; 3]) {
            self.swatches.push((name.to_owned(), rgb));
        }
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("spectral-swatch-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_sample_grey_is_white_at_zero() {
        let mut session = Session::new(ConversionSettings::default()).unwrap();
        assert_eq!(session.swatch_name(), SAMPLE_SPECTRUM_NAME);
        assert_eq!(session.factor(), session.saturation().max / 2.0);
        assert_eq!(session.set_factor(0.0), 0.0);
        assert!(session.mapping().in_gamut());
        assert_eq!(session.swatch(), [255, 255, 255]);
        assert_eq!(session.preview().describe(), "R: 255, G: 255, B: 255");
    }

    #[test]
    fn test_grey_stays_neutral() {
        let session = Session::new(ConversionSettings::default()).unwrap();
        let [r, g, b] = session.swatch();
        assert!((i16::from(r) - i16::from(g)).abs() <= 1);
        assert!((i16::from(g) - i16::from(b)).abs() <= 1);
        assert!(r < 255 && r > 0);
    }

    #[test]
    fn test_set_spectrum_recalibrates() {
        let mut session = Session::new(ConversionSettings::default()).unwrap();
        let before = session.saturation();
        session.set_spectrum_text("three points", THREE_POINTS).unwrap();
        assert_eq!(session.swatch_name(), "three points");
        assert_eq!(session.dataset().spectrum().get(580), Some(0.2));
        assert_ne!(session.saturation(), before);
        assert_eq!(session.factor(), session.saturation().default_factor);
    }

    #[test]
    fn test_failed_update_keeps_state() {
        let mut session = Session::new(ConversionSettings::default()).unwrap();
        session.set_spectrum_text("three points", THREE_POINTS).unwrap();
        session.set_factor(0.5);
        let snapshot = session.clone();

        assert!(matches!(
            session.set_spectrum_text("bad", "380\n390\n"),
            Err(SpectrumError::Parse { widest: 1 })
        ));
        assert!(session.set_observer_text("380,1,2\n780,1,2\n").is_err());
        assert!(session.select_observer("nonexistent").is_err());
        assert!(session.set_illuminant_text("only one column\n").is_err());
        assert!(matches!(
            session.set_illuminant_text("380,0\n780,0\n"),
            Err(SpectrumError::DarkIlluminant)
        ));
        assert!(session.load_spectrum("/definitely/not/here.csv").is_err());
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_delimiter_change_rereads_spectrum() {
        let mut session = Session::new(ConversionSettings::default()).unwrap();
        session
            .set_spectrum_text("tabbed", "380\t0.1\n580\t0.2\n780\t0.1\n")
            .unwrap_err();
        session.set_delimiter(Delimiter::Tab).unwrap();
        session
            .set_spectrum_text("tabbed", "380\t0.1\n580\t0.2\n780\t0.1\n")
            .unwrap();
        assert_eq!(session.dataset().spectrum().get(780), Some(0.1));

        // going back to commas can't read the tabbed text, so nothing changes
        let snapshot = session.clone();
        assert!(session.set_delimiter(Delimiter::Comma).is_err());
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_type_and_space_recalibrate() {
        let mut session = Session::new(ConversionSettings::default()).unwrap();
        let absorption = session.saturation();
        session.set_spectrum_type(SpectrumType::Emission);
        assert_ne!(session.saturation(), absorption);
        assert!(session.saturation().max > 0.0);
        let emission_adobe = session.saturation();
        session.set_color_space(ColorSpace::SRGB);
        assert_eq!(session.settings().color_space, ColorSpace::SRGB);
        assert_ne!(session.saturation(), emission_adobe);
    }

    #[test]
    fn test_factor_is_clamped() {
        let mut session = Session::new(ConversionSettings::default()).unwrap();
        let max = session.saturation().max;
        assert_eq!(session.set_factor(-1.0), 0.0);
        assert_eq!(session.set_factor(max * 10.0), max);
        assert_eq!(session.set_factor(max / 4.0), max / 4.0);
    }

    #[test]
    fn test_load_files() {
        let spectrum = temp_file("blue-dye.csv", "# absorbance\n380,0.0\n580,1.0\n780,0.0\n");
        let observer = temp_file("observer.csv", "380,1,1,1\n780,1,1,1\n");
        let illuminant = temp_file("illuminant.csv", "380,100\n780,100\n");

        let mut session = Session::new(ConversionSettings::default()).unwrap();
        session.load_spectrum(&spectrum).unwrap();
        assert!(session.swatch_name().ends_with("blue-dye.csv"));
        session.load_illuminant(&illuminant).unwrap();
        assert_eq!(session.dataset().illuminant().get(555), Some(100.0));
        session.load_observer(&observer).unwrap();
        assert_eq!(session.dataset().observer().z.get(450), Some(1.0));
        // a custom observer doesn't rename the built-in choice
        assert_eq!(session.settings().observer, "CIE 1931");

        for path in [spectrum, observer, illuminant].iter() {
            fs::remove_file(path).unwrap();
        }
    }

    #[test]
    fn test_builtin_switches() {
        let mut session = Session::new(ConversionSettings::default()).unwrap();
        session.select_illuminant(Illuminant::E).unwrap();
        assert_eq!(session.settings().illuminant, Illuminant::E);
        assert_eq!(session.dataset().illuminant().get(500), Some(100.0));
        session.select_observer("CIE 1931").unwrap();
        assert_eq!(session.settings().observer, "CIE 1931");
    }

    #[test]
    fn test_emit_swatch() {
        let mut session = Session::new(ConversionSettings::default()).unwrap();
        session.set_spectrum_text("dye", THREE_POINTS).unwrap();
        let mut sink = Recorder::default();
        session.emit_swatch(&mut sink);
        session.set_swatch_name(Some("My dye".to_owned()));
        session.emit_swatch(&mut sink);
        assert_eq!(sink.swatches.len(), 2);
        assert_eq!(sink.swatches[0], ("dye".to_owned(), session.swatch()));
        assert_eq!(sink.swatches[1].0, "My dye");
    }
}
