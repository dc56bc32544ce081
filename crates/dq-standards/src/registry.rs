#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::csv::addresses::parse_address_registry_csv;
use crate::csv::names::parse_name_frequency_csv;
use crate::csv::rules::parse_rules_csv;
use crate::error::StandardsError;
use crate::hash::sha256_hex;
use crate::manifest::{Manifest, ManifestFile};
use crate::reference::{AddressRegistry, DomainAllowList, NameFrequencyTable};
use crate::rules::RuleConfig;

pub const MANIFEST_FILE: &str = "manifest.toml";
pub const MANIFEST_SCHEMA: &str = "dq.reference-manifest";

pub const ROLE_RULES: &str = "rules";
pub const ROLE_ADDRESS_REGISTRY: &str = "address_registry";
pub const ROLE_FIRST_NAMES: &str = "first_names";
pub const ROLE_SURNAMES: &str = "surnames";
pub const ROLE_EMAIL_DOMAINS: &str = "email_domains";

const REQUIRED_ROLES: &[&str] = &[
    ROLE_RULES,
    ROLE_ADDRESS_REGISTRY,
    ROLE_FIRST_NAMES,
    ROLE_SURNAMES,
    ROLE_EMAIL_DOMAINS,
];

const ALLOWED_KINDS: &[&str] = &["csv", "txt", "toml", "other"];

#[derive(Debug, Clone, serde::Serialize)]
pub struct VerifySummary {
    pub reference_dir: PathBuf,
    pub manifest_pins: crate::manifest::Pins,
    pub file_count: usize,
    pub rule_count: usize,
    pub unknown_rule_count: usize,
    pub address_count: usize,
    pub first_name_count: usize,
    pub surname_count: usize,
    pub email_domain_count: usize,
}

/// Verified reference data, loaded once per run and shared read-only.
#[derive(Debug, Clone)]
pub struct ReferenceRegistry {
    pub manifest: Manifest,
    pub files: Vec<ManifestFile>,
    pub rules: RuleConfig,
    pub addresses: AddressRegistry,
    pub first_names: NameFrequencyTable,
    pub surnames: NameFrequencyTable,
    pub email_domains: DomainAllowList,
}

impl ReferenceRegistry {
    /// Verify every file against the manifest, then load the reference sets.
    pub fn verify_and_load(reference_dir: &Path) -> Result<(Self, VerifySummary), StandardsError> {
        let manifest = load_manifest(&reference_dir.join(MANIFEST_FILE))?;

        validate_manifest(&manifest, reference_dir)?;

        let mut files = manifest.files.clone();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        for file in &files {
            verify_file(reference_dir, file)?;
        }
        debug!(file_count = files.len(), "reference files verified");

        let rules = parse_rules_csv(&resolve_role_path(reference_dir, &files, ROLE_RULES)?)?;

        let address_path = resolve_role_path(reference_dir, &files, ROLE_ADDRESS_REGISTRY)?;
        let addresses = AddressRegistry::from_keys(parse_address_registry_csv(&address_path)?);
        if addresses.is_empty() {
            return Err(StandardsError::EmptyReference { path: address_path });
        }

        let first_names = load_names(&resolve_role_path(reference_dir, &files, ROLE_FIRST_NAMES)?)?;
        let surnames = load_names(&resolve_role_path(reference_dir, &files, ROLE_SURNAMES)?)?;

        let email_domains =
            DomainAllowList::load(&resolve_role_path(reference_dir, &files, ROLE_EMAIL_DOMAINS)?)?;

        let summary = VerifySummary {
            reference_dir: reference_dir.to_path_buf(),
            manifest_pins: manifest.pins.clone(),
            file_count: files.len(),
            rule_count: rules.len(),
            unknown_rule_count: rules.unknown_codes().len(),
            address_count: addresses.len(),
            first_name_count: first_names.len(),
            surname_count: surnames.len(),
            email_domain_count: email_domains.len(),
        };
        info!(
            addresses = summary.address_count,
            first_names = summary.first_name_count,
            surnames = summary.surname_count,
            email_domains = summary.email_domain_count,
            "reference data loaded"
        );

        Ok((
            Self {
                manifest,
                files,
                rules,
                addresses,
                first_names,
                surnames,
                email_domains,
            },
            summary,
        ))
    }
}

fn load_names(path: &Path) -> Result<NameFrequencyTable, StandardsError> {
    let table = NameFrequencyTable::from_canonical(parse_name_frequency_csv(path)?);
    if table.is_empty() {
        return Err(StandardsError::EmptyReference {
            path: path.to_path_buf(),
        });
    }
    Ok(table)
}

fn load_manifest(path: &Path) -> Result<Manifest, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest, reference_dir: &Path) -> Result<(), StandardsError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != 1 {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut roles: BTreeSet<&str> = BTreeSet::new();
    let mut manifest_paths: BTreeSet<PathBuf> = BTreeSet::new();

    for file in &manifest.files {
        if !roles.insert(file.role.as_str()) {
            return Err(StandardsError::DuplicateRole {
                role: file.role.clone(),
            });
        }

        if !ALLOWED_KINDS.contains(&file.kind.as_str()) {
            return Err(StandardsError::InvalidManifest {
                message: format!("unsupported kind '{}' for {}", file.kind, file.path),
            });
        }

        validate_sha(&file.sha256, &file.path)?;
        manifest_paths.insert(normalize_path(&validate_path(&file.path)?));
    }

    for role in REQUIRED_ROLES {
        if !roles.contains(role) {
            return Err(StandardsError::MissingRole {
                role: role.to_string(),
            });
        }
    }

    for path in list_files_under(reference_dir)? {
        if path == Path::new(MANIFEST_FILE) {
            continue;
        }
        if !manifest_paths.contains(&normalize_path(&path)) {
            return Err(StandardsError::UnexpectedFile {
                path: reference_dir.join(path),
            });
        }
    }

    Ok(())
}

fn verify_file(reference_dir: &Path, file: &ManifestFile) -> Result<(), StandardsError> {
    let full_path = reference_dir.join(&file.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StandardsError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            StandardsError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = file.sha256.to_ascii_lowercase();
    if actual != expected {
        return Err(StandardsError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    Ok(())
}

fn resolve_role_path(
    reference_dir: &Path,
    files: &[ManifestFile],
    role: &str,
) -> Result<PathBuf, StandardsError> {
    let file = files
        .iter()
        .find(|f| f.role == role)
        .ok_or_else(|| StandardsError::MissingRole {
            role: role.to_string(),
        })?;
    Ok(reference_dir.join(&file.path))
}

fn validate_sha(sha: &str, path: &str) -> Result<(), StandardsError> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StandardsError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<PathBuf, StandardsError> {
    if path.contains('\\') {
        return Err(StandardsError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must not traverse out of the reference directory".to_string(),
        });
    }

    Ok(p)
}

fn list_files_under(root: &Path) -> Result<BTreeSet<PathBuf>, StandardsError> {
    let mut stack = vec![root.to_path_buf()];
    let mut files = BTreeSet::new();

    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir).map_err(|e| StandardsError::io(&dir, e))? {
            let entry = entry.map_err(|e| StandardsError::io(&dir, e))?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.is_file() {
                let rel = path
                    .strip_prefix(root)
                    .map_err(|e| StandardsError::InvalidPath {
                        path: path.clone(),
                        message: format!("failed to relativize path: {e}"),
                    })?
                    .to_path_buf();
                files.insert(rel);
            }
        }
    }

    Ok(files)
}

fn normalize_path(p: &Path) -> PathBuf {
    p.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
