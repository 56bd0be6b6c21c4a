// tests/generate_test.rs
use release_announcer::cli::{run_generate, GenerateArgs};
use release_announcer::config::Config;
use release_announcer::domain::{AnnouncementManifest, ArtifactDescriptor, Digests};
use release_announcer::index::MockPackageIndex;
use release_announcer::send::MockInteraction;
use release_announcer::verify::sha256_file;
use release_announcer::AnnounceError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SDIST_BYTES: &[u8] = b"sdist contents";
const WHEEL_BYTES: &[u8] = b"wheel contents";

fn descriptor(filename: &str, packagetype: &str, sha256: String) -> ArtifactDescriptor {
    ArtifactDescriptor {
        filename: filename.to_string(),
        url: format!("https://files.example/packages/{}", filename),
        packagetype: packagetype.to_string(),
        size: 14,
        digests: Digests {
            sha256,
            md5: None,
            blake2b_256: None,
        },
    }
}

fn sha256_of(bytes: &[u8]) -> String {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blob");
    fs::write(&path, bytes).unwrap();
    sha256_file(&path).unwrap()
}

fn sdist_name(version: &str) -> String {
    format!("ansible-{}.tar.gz", version)
}

fn wheel_name(version: &str) -> String {
    format!("ansible-{}-py3-none-any.whl", version)
}

/// Index serving `ansible==version` with digests of `SDIST_BYTES` / `WHEEL_BYTES`
fn index_with(version: &str) -> MockPackageIndex {
    let mut index = MockPackageIndex::new();
    index.add_release(
        "ansible",
        version,
        vec![
            descriptor(&sdist_name(version), "sdist", sha256_of(SDIST_BYTES)),
            descriptor(&wheel_name(version), "bdist_wheel", sha256_of(WHEEL_BYTES)),
        ],
    );
    index
}

fn write_deps(data_dir: &Path, version: &str, core: &str) {
    fs::write(
        data_dir.join(format!("ansible-{}.deps", version)),
        format!(
            "_ansible_version: {}\n_ansible_core_version: {}\n_python: >=3.10\namazon.aws: 7.0.0\n",
            version, core
        ),
    )
    .unwrap();
}

fn generate_args(work: &TempDir, version: &str) -> GenerateArgs {
    GenerateArgs {
        version: version.to_string(),
        data_dir: work.path().to_path_buf(),
        deps_file: None,
        output_dir: work.path().join("announcements"),
        dist_dir: None,
        end_of_life: false,
        send: false,
    }
}

#[test]
fn test_final_release_is_not_prerelease() {
    let work = TempDir::new().unwrap();
    write_deps(work.path(), "2.16.0", "2.16.0");
    let index = index_with("2.16.0");

    let result = run_generate(
        &generate_args(&work, "2.16.0"),
        &Config::default(),
        &index,
        &mut MockInteraction::new(),
    )
    .unwrap();

    assert!(!result.context.is_prerelease);
    assert_eq!(result.context.major_version, 2);
    assert_eq!(
        index.requests(),
        vec![("ansible".to_string(), "2.16.0".to_string())]
    );

    let forum = fs::read_to_string(&result.written[0]).unwrap();
    assert!(!forum.contains("pre-release"));
}

#[test]
fn test_release_candidate_is_prerelease() {
    let work = TempDir::new().unwrap();
    write_deps(work.path(), "2.16.0rc1", "2.16.0rc1");
    let index = index_with("2.16.0rc1");

    let result = run_generate(
        &generate_args(&work, "2.16.0rc1"),
        &Config::default(),
        &index,
        &mut MockInteraction::new(),
    )
    .unwrap();

    assert!(result.context.is_prerelease);
    assert_eq!(result.context.major_version, 2);
}

#[test]
fn test_manifest_reproduces_context() {
    let work = TempDir::new().unwrap();
    write_deps(work.path(), "9.0.0", "2.16.0");
    let index = index_with("9.0.0");
    let mut args = generate_args(&work, "9.0.0");
    args.end_of_life = true;

    let result = run_generate(&args, &Config::default(), &index, &mut MockInteraction::new())
        .unwrap();
    let manifest = AnnouncementManifest::load(&result.manifest).unwrap();

    assert_eq!(manifest.template_vars, result.context);
    assert_eq!(
        manifest.outputs,
        vec![
            "ansible-forum-announcement.md".to_string(),
            "ansible-matrix-announcement.md".to_string()
        ]
    );
    assert!(manifest.template_vars.is_major_release);
    assert!(manifest.template_vars.end_of_life);
    assert_eq!(
        manifest.template_vars.build_data_path,
        "https://github.com/ansible-community/ansible-build-data/blob/9.0.0/9"
    );
}

#[test]
fn test_verified_dist_dir_passes() {
    let work = TempDir::new().unwrap();
    write_deps(work.path(), "9.1.0", "2.16.2");
    let index = index_with("9.1.0");
    let dist = TempDir::new().unwrap();
    fs::write(dist.path().join(sdist_name("9.1.0")), SDIST_BYTES).unwrap();
    fs::write(dist.path().join(wheel_name("9.1.0")), WHEEL_BYTES).unwrap();

    let mut args = generate_args(&work, "9.1.0");
    args.dist_dir = Some(dist.path().to_path_buf());

    let result = run_generate(&args, &Config::default(), &index, &mut MockInteraction::new())
        .unwrap();
    assert_eq!(result.written.len(), 2);
}

#[test]
fn test_missing_sdist_in_dist_dir_writes_nothing() {
    let work = TempDir::new().unwrap();
    write_deps(work.path(), "9.1.0", "2.16.2");
    let index = index_with("9.1.0");
    let dist = TempDir::new().unwrap();
    fs::write(dist.path().join(wheel_name("9.1.0")), WHEEL_BYTES).unwrap();

    let mut args = generate_args(&work, "9.1.0");
    args.dist_dir = Some(dist.path().to_path_buf());

    let err = run_generate(&args, &Config::default(), &index, &mut MockInteraction::new())
        .unwrap_err();

    assert!(matches!(err, AnnounceError::MissingFile { .. }));
    assert_eq!(
        err.to_string(),
        "ansible-9.1.0.tar.gz was not found in --dist-dir"
    );
    assert!(!args.output_dir.exists());
}

#[test]
fn test_tampered_wheel_is_rejected() {
    let work = TempDir::new().unwrap();
    write_deps(work.path(), "9.1.0", "2.16.2");
    let index = index_with("9.1.0");
    let dist = TempDir::new().unwrap();
    fs::write(dist.path().join(sdist_name("9.1.0")), SDIST_BYTES).unwrap();
    fs::write(dist.path().join(wheel_name("9.1.0")), b"something else").unwrap();

    let mut args = generate_args(&work, "9.1.0");
    args.dist_dir = Some(dist.path().to_path_buf());

    let err = run_generate(&args, &Config::default(), &index, &mut MockInteraction::new())
        .unwrap_err();

    match err {
        AnnounceError::VerificationMismatch { path, url } => {
            assert!(path.ends_with(wheel_name("9.1.0")));
            assert!(url.ends_with(&wheel_name("9.1.0")));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!args.output_dir.exists());
}

#[test]
fn test_unpublished_release_is_not_found() {
    let work = TempDir::new().unwrap();
    write_deps(work.path(), "99.0.0", "2.99.0");
    let index = index_with("9.1.0");

    let err = run_generate(
        &generate_args(&work, "99.0.0"),
        &Config::default(),
        &index,
        &mut MockInteraction::new(),
    )
    .unwrap_err();

    assert!(matches!(err, AnnounceError::NotFound(_)));
}
