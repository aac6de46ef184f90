// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::computation_node::ComputationNode;
use crate::core::emitter::MediumEmitter;
use crate::core::medium::{Medium, MediumBase, MediumEventSamplingMode};
use crate::core::phase::PhaseFunction;
use crate::core::volume::Volume;
use crate::emitters::volume_light::VolumeLight;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::UnpolarizedSpectrum;
use crate::math::transform::Transform;
use crate::media::heterogeneous_medium::HeterogeneousMedium;
use crate::media::homogeneous_medium::HomogeneousMedium;
use crate::phase::hg::HGPhaseFunction;
use crate::phase::isotropic::IsotropicPhaseFunction;
use crate::volumes::const_volume::ConstantVolume;
use crate::volumes::grid_volume::{GridVolume, VolumeLoadError};
use crate::volumes::{VolumeFilterMode, VolumeWrapMode};

const DEFAULT_ALBEDO: Float = 0.75;

#[derive(Debug)]
pub enum MediumLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
    Volume(VolumeLoadError),
}

impl fmt::Display for MediumLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediumLoadError::Io(err) => write!(f, "io error: {}", err),
            MediumLoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            MediumLoadError::MissingField(field) => write!(f, "missing field: {}", field),
            MediumLoadError::Volume(err) => write!(f, "volume error: {}", err),
        }
    }
}

impl std::error::Error for MediumLoadError {}

impl From<std::io::Error> for MediumLoadError {
    fn from(err: std::io::Error) -> Self {
        MediumLoadError::Io(err)
    }
}

impl From<VolumeLoadError> for MediumLoadError {
    fn from(err: VolumeLoadError) -> Self {
        MediumLoadError::Volume(err)
    }
}

/// Loads the first `<medium>` found in a Mitsuba-style XML file.
pub fn load_medium<const N: usize>(path: &Path) -> Result<Arc<dyn Medium<N>>, MediumLoadError> {
    load_media::<N>(path)?
        .into_iter()
        .next()
        .ok_or(MediumLoadError::MissingField("medium"))
}

pub fn load_media<const N: usize>(path: &Path) -> Result<Vec<Arc<dyn Medium<N>>>, MediumLoadError> {
    log::info!("Loading media from {}", path.display());
    let xml = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_media::<N>(&xml, base_dir)
}

pub fn parse_medium<const N: usize>(xml: &str, base_dir: &Path) -> Result<Arc<dyn Medium<N>>, MediumLoadError> {
    parse_media::<N>(xml, base_dir)?
        .into_iter()
        .next()
        .ok_or(MediumLoadError::MissingField("medium"))
}

/// Parses every `<medium>` element in document order, wherever it is nested.
/// Relative volume filenames are resolved against `base_dir`.
pub fn parse_media<const N: usize>(xml: &str, base_dir: &Path) -> Result<Vec<Arc<dyn Medium<N>>>, MediumLoadError> {
    let roots = parse_tree(xml)?;
    let mut media = Vec::new();
    for root in &roots {
        collect_media::<N>(root, base_dir, &mut media)?;
    }
    Ok(media)
}

fn collect_media<const N: usize>(node: &XmlNode,
                                 base_dir: &Path,
                                 media: &mut Vec<Arc<dyn Medium<N>>>) -> Result<(), MediumLoadError> {
    if node.tag == "medium" {
        let medium = build_medium::<N>(node, base_dir)?;
        log::debug!("Parsed {}", medium.to_string());
        media.push(medium);
        return Ok(());
    }
    for child in &node.children {
        collect_media::<N>(child, base_dir, media)?;
    }
    Ok(())
}

/// Element tree with `$name` defaults already substituted into attributes.
#[derive(Debug, Default)]
struct XmlNode {
    tag: String,
    attrs: HashMap<String, String>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(|s| s.as_str())
    }

    fn required_attr(&self, key: &'static str) -> Result<&str, MediumLoadError> {
        self.attr(key).ok_or(MediumLoadError::MissingField(key))
    }

    fn name(&self) -> Option<&str> {
        self.attr("name")
    }
}

fn parse_tree(xml: &str) -> Result<Vec<XmlNode>, MediumLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut roots: Vec<XmlNode> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                let node = read_node(&e, &mut defaults)?;
                stack.push(node);
            }
            Ok(Event::Empty(e)) => {
                let node = read_node(&e, &mut defaults)?;
                attach(node, &mut stack, &mut roots);
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| MediumLoadError::Parse("unbalanced closing tag".to_string()))?;
                attach(node, &mut stack, &mut roots);
            }
            Ok(_) => {}
            Err(e) => {
                return Err(MediumLoadError::Parse(format!(
                    "xml error at position {}: {:?}", reader.buffer_position(), e)));
            }
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(MediumLoadError::Parse("unexpected end of document".to_string()));
    }
    Ok(roots)
}

fn read_node(e: &BytesStart, defaults: &mut HashMap<String, String>) -> Result<XmlNode, MediumLoadError> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut attrs = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| MediumLoadError::Parse(format!("bad attribute {}: {:?}", key, err)))?;
        attrs.insert(key, resolve_value(&value, defaults));
    }

    if tag == "default" {
        if let (Some(k), Some(v)) = (attrs.get("name"), attrs.get("value")) {
            defaults.insert(k.clone(), v.clone());
        }
    }

    Ok(XmlNode { tag, attrs, children: Vec::new() })
}

fn attach(node: XmlNode, stack: &mut [XmlNode], roots: &mut Vec<XmlNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// A medium parameter given either as a constant or as a volume.
enum Property {
    Value(Vector3f),
    Volume(Arc<dyn Volume>),
}

impl Property {
    fn into_volume(self) -> Arc<dyn Volume> {
        match self {
            Property::Value(v) => Arc::new(ConstantVolume::from_value(v)),
            Property::Volume(volume) => volume,
        }
    }
}

fn build_medium<const N: usize>(node: &XmlNode, base_dir: &Path) -> Result<Arc<dyn Medium<N>>, MediumLoadError> {
    let medium_type = node.required_attr("type")?;

    let mut sigma_t: Option<Property> = None;
    let mut albedo: Option<Property> = None;
    let mut scale: Float = 1.0;
    let mut sampling_mode = MediumEventSamplingMode::default();
    let mut sample_emitters = true;
    let mut spectral_extinction: Option<bool> = None;
    let mut phase: Option<Arc<dyn PhaseFunction>> = None;
    let mut emitter: Option<Arc<dyn MediumEmitter<N>>> = None;

    for child in &node.children {
        match (child.tag.as_str(), child.name()) {
            ("phase", _) => phase = Some(build_phase(child)?),
            ("emitter", _) => emitter = Some(build_emitter::<N>(child, base_dir)?),
            (_, Some("sigma_t")) => sigma_t = Some(parse_property(child, base_dir)?),
            (_, Some("albedo")) => albedo = Some(parse_property(child, base_dir)?),
            ("float", Some("scale")) => scale = parse_float(child.required_attr("value")?)?,
            ("string", Some("medium_sampling_mode")) => {
                sampling_mode = child.required_attr("value")?.parse()?;
            }
            ("boolean", Some("sample_emitters")) => {
                sample_emitters = parse_bool(child.required_attr("value")?)?;
            }
            ("boolean", Some("has_spectral_extinction")) => {
                spectral_extinction = Some(parse_bool(child.required_attr("value")?)?);
            }
            (tag, name) => {
                log::warn!("Ignoring <{}> {:?} in medium of type {}", tag, name, medium_type);
            }
        }
    }

    let id = node.attr("id").map(|s| s.to_string());
    let base = MediumBase::<N>::new(id, medium_type)
        .with_phase_function(phase.unwrap_or_else(|| Arc::new(IsotropicPhaseFunction::new(None))))
        .with_emitter(emitter)
        .with_sample_emitters(sample_emitters)
        .with_sampling_mode(sampling_mode);
    let albedo = albedo.unwrap_or(Property::Value(Vector3f::new(DEFAULT_ALBEDO, DEFAULT_ALBEDO, DEFAULT_ALBEDO)));

    match medium_type {
        "homogeneous" => {
            let sigma_t = match sigma_t {
                None => UnpolarizedSpectrum::<N>::one(),
                Some(Property::Value(v)) => UnpolarizedSpectrum::from_rgb(v),
                Some(Property::Volume(_)) => {
                    return Err(MediumLoadError::Parse(
                        "homogeneous sigma_t must be a constant".to_string()));
                }
            };
            let spectral = spectral_extinction.unwrap_or_else(|| sigma_t.is_spectrally_varying());
            let medium = match albedo {
                Property::Value(v) => HomogeneousMedium::new(sigma_t, UnpolarizedSpectrum::from_rgb(v)),
                Property::Volume(volume) => HomogeneousMedium::new(sigma_t, UnpolarizedSpectrum::one())
                    .with_albedo_volume(volume),
            };
            Ok(Arc::new(medium
                .with_scale(scale)
                .with_base(base.with_spectral_extinction(spectral))))
        }
        "heterogeneous" => {
            let density = sigma_t
                .ok_or(MediumLoadError::MissingField("sigma_t"))?
                .into_volume();
            let spectral = spectral_extinction.unwrap_or(density.channels() > 1);
            let medium = HeterogeneousMedium::new(density, albedo.into_volume())
                .with_scale(scale)
                .with_base(base.with_spectral_extinction(spectral));
            Ok(Arc::new(medium))
        }
        other => Err(MediumLoadError::Parse(format!("unsupported medium type: {}", other))),
    }
}

fn build_phase(node: &XmlNode) -> Result<Arc<dyn PhaseFunction>, MediumLoadError> {
    let id = node.attr("id").map(|s| s.to_string());
    match node.required_attr("type")? {
        "isotropic" => Ok(Arc::new(IsotropicPhaseFunction::new(id))),
        "hg" => {
            let g = match find_property(node, "g") {
                Some(child) => parse_float(child.required_attr("value")?)?,
                None => 0.8,
            };
            Ok(Arc::new(HGPhaseFunction::new(g, id)))
        }
        other => Err(MediumLoadError::Parse(format!("unsupported phase function: {}", other))),
    }
}

fn build_emitter<const N: usize>(node: &XmlNode, base_dir: &Path) -> Result<Arc<dyn MediumEmitter<N>>, MediumLoadError> {
    match node.required_attr("type")? {
        "volumelight" => {
            let radiance = match find_property(node, "radiance") {
                Some(child) => parse_property(child, base_dir)?.into_volume(),
                None => return Err(MediumLoadError::MissingField("radiance")),
            };
            let scale = match find_property(node, "scale") {
                Some(child) => parse_float(child.required_attr("value")?)?,
                None => 1.0,
            };
            let id = node.attr("id").map(|s| s.to_string());
            Ok(Arc::new(VolumeLight::<N>::new(radiance, scale, id)))
        }
        other => Err(MediumLoadError::Parse(format!("unsupported medium emitter: {}", other))),
    }
}

fn find_property<'a>(node: &'a XmlNode, name: &str) -> Option<&'a XmlNode> {
    node.children.iter().find(|child| child.name() == Some(name))
}

fn parse_property(node: &XmlNode, base_dir: &Path) -> Result<Property, MediumLoadError> {
    match node.tag.as_str() {
        "volume" => Ok(Property::Volume(build_volume(node, base_dir)?)),
        "float" | "rgb" | "spectrum" => Ok(Property::Value(parse_color(node.required_attr("value")?)?)),
        other => Err(MediumLoadError::Parse(format!("unsupported property element <{}>", other))),
    }
}

fn build_volume(node: &XmlNode, base_dir: &Path) -> Result<Arc<dyn Volume>, MediumLoadError> {
    match node.required_attr("type")? {
        "constvolume" => {
            let value = find_property(node, "value")
                .ok_or(MediumLoadError::MissingField("value"))?;
            Ok(Arc::new(ConstantVolume::from_value(parse_color(value.required_attr("value")?)?)))
        }
        "gridvolume" => {
            let filename = find_property(node, "filename")
                .ok_or(MediumLoadError::MissingField("filename"))?
                .required_attr("value")?;
            let path = base_dir.join(filename);
            let mut volume = GridVolume::from_file(&path)?;

            for child in &node.children {
                match (child.tag.as_str(), child.name()) {
                    ("string", Some("filename")) => {}
                    ("string", Some("filter_type")) => {
                        let mode: VolumeFilterMode = child.required_attr("value")?.parse().map_err(MediumLoadError::Parse)?;
                        volume.set_filter_mode(mode);
                    }
                    ("string", Some("wrap_mode")) => {
                        let mode: VolumeWrapMode = child.required_attr("value")?.parse().map_err(MediumLoadError::Parse)?;
                        volume.set_wrap_mode(mode);
                    }
                    ("boolean", Some("use_grid_bbox")) => {
                        volume.set_use_grid_bbox(parse_bool(child.required_attr("value")?)?);
                    }
                    ("transform", Some("to_world")) => volume.set_transform(parse_transform(child)?),
                    (tag, name) => log::warn!("Ignoring <{}> {:?} in gridvolume", tag, name),
                }
            }
            Ok(Arc::new(volume))
        }
        other => Err(MediumLoadError::Parse(format!("unsupported volume type: {}", other))),
    }
}

/// Supports `scale` and `translate`, applied in document order.
fn parse_transform(node: &XmlNode) -> Result<Transform, MediumLoadError> {
    let mut scale = Vector3f::new(1.0, 1.0, 1.0);
    let mut translate = Vector3f::zeros();
    for child in &node.children {
        let component = |key: &str, default: Float| -> Result<Float, MediumLoadError> {
            child.attr(key).map(parse_float).unwrap_or(Ok(default))
        };
        match child.tag.as_str() {
            "scale" => {
                let s = match child.attr("value") {
                    Some(v) => {
                        let u = parse_float(v)?;
                        Vector3f::new(u, u, u)
                    }
                    None => Vector3f::new(component("x", 1.0)?, component("y", 1.0)?, component("z", 1.0)?),
                };
                scale = scale.component_mul(&s);
                translate = translate.component_mul(&s);
            }
            "translate" => {
                translate += Vector3f::new(component("x", 0.0)?, component("y", 0.0)?, component("z", 0.0)?);
            }
            other => log::warn!("Ignoring <{}> in transform", other),
        }
    }
    Ok(Transform::from_scale_translate(&scale, &translate))
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn parse_float(value: &str) -> Result<Float, MediumLoadError> {
    value.trim().parse::<Float>().map_err(|_| MediumLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_bool(value: &str) -> Result<bool, MediumLoadError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(MediumLoadError::Parse(format!("invalid boolean: {}", other))),
    }
}

/// Accepts a single float or three comma/space separated components.
fn parse_color(value: &str) -> Result<Vector3f, MediumLoadError> {
    let parts: Vec<&str> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    match parts.as_slice() {
        [v] => {
            let v = parse_float(v)?;
            Ok(Vector3f::new(v, v, v))
        }
        [x, y, z] => Ok(Vector3f::new(parse_float(x)?, parse_float(y)?, parse_float(z)?)),
        _ => Err(MediumLoadError::Parse(format!("invalid color: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interaction::MediumInteraction;
    use crate::core::medium::{BoundaryIntersector, MajorantProvider};
    use crate::math::ray::Ray3f;
    use crate::math::spectrum::RGBSpectrum;
    use crate::volumes::grid_volume::tests::encode_vol;

    fn parse3(xml: &str) -> Result<Arc<dyn Medium<3>>, MediumLoadError> {
        parse_medium::<3>(xml, Path::new("."))
    }

    #[test]
    fn test_homogeneous_medium() {
        let xml = r#"
            <scene version="3.0.0">
                <default name="density" value="2.0"/>
                <medium type="homogeneous" id="fog">
                    <rgb name="sigma_t" value="1, 2, 3"/>
                    <rgb name="albedo" value="0.9 0.8 0.7"/>
                    <float name="scale" value="$density"/>
                    <string name="medium_sampling_mode" value="max"/>
                    <boolean name="sample_emitters" value="false"/>
                    <phase type="hg">
                        <float name="g" value="0.3"/>
                    </phase>
                </medium>
            </scene>"#;
        let medium = parse3(xml).expect("valid medium");
        assert_eq!(medium.id(), "fog");
        assert!(medium.is_homogeneous());
        assert!(medium.has_spectral_extinction());
        assert!(!medium.use_emitter_sampling());
        assert!(!medium.is_emitter());
        assert_eq!(medium.sampling_mode(), MediumEventSamplingMode::Maximum);
        assert!(medium.phase_function().to_string().contains("g=0.3"));

        let mi = MediumInteraction::invalid();
        assert_eq!(medium.get_majorant(&mi, true), RGBSpectrum::new([2.0, 4.0, 6.0]));

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 1.0, 0.0), None, None);
        let mi = medium.sample_interaction(&ray, 0.5, 1, true);
        assert!(mi.active());
        assert!((mi.t() - (2.0 as Float).ln() / 4.0).abs() < 1e-5);
        assert!((mi.albedo()[2] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_defaults() {
        let medium = parse3(r#"<medium type="homogeneous"/>"#).expect("valid medium");
        let mi = MediumInteraction::invalid();
        assert_eq!(medium.get_majorant(&mi, true), RGBSpectrum::one());
        assert!(!medium.has_spectral_extinction());
        assert_eq!(medium.sampling_mode(), MediumEventSamplingMode::Analogue);
        assert!(medium.use_emitter_sampling());
        assert!(medium.id().starts_with("homogeneous"));
        assert!(medium.phase_function().to_string().contains("Isotropic"));
    }

    #[test]
    fn test_explicit_spectral_flag_wins() {
        let xml = r#"<medium type="homogeneous">
                        <float name="sigma_t" value="1"/>
                        <boolean name="has_spectral_extinction" value="true"/>
                     </medium>"#;
        assert!(parse3(xml).expect("valid medium").has_spectral_extinction());
    }

    #[test]
    fn test_heterogeneous_with_const_volume_and_emitter() {
        let xml = r#"
            <scene>
                <shape type="cube">
                    <medium type="heterogeneous" name="interior" id="smoke">
                        <volume name="sigma_t" type="constvolume">
                            <float name="value" value="1.5"/>
                        </volume>
                        <volume name="albedo" type="constvolume">
                            <rgb name="value" value="0.5, 0.6, 0.7"/>
                        </volume>
                        <float name="scale" value="2"/>
                        <emitter type="volumelight">
                            <rgb name="radiance" value="1, 1, 0"/>
                            <float name="scale" value="4"/>
                        </emitter>
                    </medium>
                </shape>
            </scene>"#;
        let medium = parse3(xml).expect("valid medium");
        assert_eq!(medium.id(), "smoke");
        assert!(!medium.is_homogeneous());
        assert!(!medium.has_spectral_extinction());
        assert!(medium.is_emitter());

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let mi = medium.sample_interaction(&ray, 0.5, 0, true);
        assert!(mi.active());
        assert_eq!(mi.combined_extinction(), RGBSpectrum::splat(3.0));
        assert!((mi.albedo()[1] - 0.6).abs() < 1e-6);
        assert_eq!(medium.get_radiance(&mi, true), RGBSpectrum::new([4.0, 4.0, 0.0]));
    }

    #[test]
    fn test_grid_volume_relative_path() {
        let dir = std::env::temp_dir().join(format!("medium_loader_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create temp dir");
        let data = [0.0, 2.0, 0.0, 2.0, 0.0, 2.0, 0.0, 2.0];
        fs::write(dir.join("density.vol"), encode_vol((2, 2, 2), 1, [0.0, 0.0, 0.0, 1.0, 1.0, 1.0], &data))
            .expect("write vol");
        let xml = r#"
            <medium type="heterogeneous">
                <volume name="sigma_t" type="gridvolume">
                    <string name="filename" value="density.vol"/>
                    <string name="filter_type" value="nearest"/>
                    <transform name="to_world">
                        <scale value="2"/>
                        <translate x="1"/>
                    </transform>
                </volume>
            </medium>"#;
        let path = dir.join("scene.xml");
        fs::write(&path, xml).expect("write xml");

        let medium = load_medium::<1>(&path).expect("valid medium");
        let _ = fs::remove_dir_all(&dir);

        let mi = MediumInteraction::invalid();
        assert!((medium.get_majorant(&mi, true)[0] - 2.0).abs() < 1e-6);
        let (hit, t_near, t_far) = medium.intersect_aabb(&Ray3f::new(Vector3f::new(0.0, 1.0, 1.0),
                                                                      Vector3f::new(1.0, 0.0, 0.0), None, None));
        assert!(hit);
        assert!((t_near - 1.0).abs() < 1e-5);
        assert!((t_far - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse3("<scene/>"), Err(MediumLoadError::MissingField("medium"))));
        assert!(matches!(parse3(r#"<medium/>"#), Err(MediumLoadError::MissingField("type"))));
        assert!(matches!(parse3(r#"<medium type="fancy"/>"#), Err(MediumLoadError::Parse(_))));
        assert!(matches!(parse3(r#"<medium type="heterogeneous"/>"#), Err(MediumLoadError::MissingField("sigma_t"))));
        assert!(matches!(
            parse3(r#"<medium type="homogeneous"><string name="medium_sampling_mode" value="median"/></medium>"#),
            Err(MediumLoadError::Parse(_))));
        assert!(matches!(
            parse3(r#"<medium type="homogeneous"><float name="scale" value="abc"/></medium>"#),
            Err(MediumLoadError::Parse(_))));
        assert!(matches!(
            parse3(r#"<medium type="heterogeneous"><volume name="sigma_t" type="gridvolume"><string name="filename" value="missing.vol"/></volume></medium>"#),
            Err(MediumLoadError::Volume(VolumeLoadError::Io(_)))));
        assert!(matches!(parse3(r#"<medium type="homogeneous">"#), Err(MediumLoadError::Parse(_))));
        assert!(matches!(load_medium::<3>(Path::new("/nonexistent/media.xml")), Err(MediumLoadError::Io(_))));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("0.5").expect("scalar"), Vector3f::new(0.5, 0.5, 0.5));
        assert_eq!(parse_color("1, 2,3").expect("rgb"), Vector3f::new(1.0, 2.0, 3.0));
        assert!(parse_color("1, 2").is_err());
    }

    #[test]
    fn test_multiple_media() {
        let xml = r#"<scene>
                        <medium type="homogeneous" id="a"/>
                        <medium type="homogeneous" id="b"/>
                     </scene>"#;
        let media = parse_media::<1>(xml, Path::new(".")).expect("valid media");
        let ids: Vec<&str> = media.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
