//! Integration tests for status parsing and description composition.

use bentoo::changes::{ChangeKind, describe_status, parse_status};
use bentoo::compose;

#[test]
fn test_single_added_package() {
    assert_eq!(
        describe_status("A  dev-lang/foo/foo-1.2.ebuild"),
        "add(dev-lang/foo-1.2)"
    );
}

#[test]
fn test_related_pair_collapses_to_brace_form() {
    let listing = "A  cat/foo/foo-1.0.ebuild\nA  cat/foobar/foobar-1.0.ebuild\n";
    assert_eq!(describe_status(listing), "add(cat/foo{,bar}-1.0)");
}

#[test]
fn test_rename_upgrade() {
    let listing = "R  cat/pkg/pkg-1.0.ebuild -> cat/pkg/pkg-2.0.ebuild";
    let records = parse_status(listing);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, ChangeKind::Upgraded);
    assert_eq!(describe_status(listing), "up(cat/pkg-1.0 -> 2.0)");
}

#[test]
fn test_rename_downgrade() {
    let listing = "R  cat/pkg/pkg-2.0.ebuild -> cat/pkg/pkg-1.0.ebuild";
    let records = parse_status(listing);
    assert_eq!(records[0].kind, ChangeKind::Downgraded);
    assert_eq!(describe_status(listing), "down(cat/pkg-2.0 -> 1.0)");
}

#[test]
fn test_rename_with_tied_versions_reads_as_upgrade() {
    // 1.0 and 1_0 carry the same numeric components.
    let listing = "R  cat/pkg/pkg-1.0.ebuild -> cat/pkg/pkg-1_0.ebuild";
    assert_eq!(parse_status(listing)[0].kind, ChangeKind::Upgraded);
}

#[test]
fn test_three_unrelated_packages() {
    let listing = "\
A  cat/beta/beta-2.0.ebuild
A  cat/gamma/gamma-3.0.ebuild
A  cat/alpha/alpha-1.0.ebuild
";
    assert_eq!(
        describe_status(listing),
        "add(cat/{alpha-1.0, beta-2.0, gamma-3.0})"
    );
}

#[test]
fn test_empty_input() {
    assert!(parse_status("").is_empty());
    assert_eq!(compose(&[]), "");
}

#[test]
fn test_bookkeeping_files_never_described() {
    let listing = "\
A  cat/pkg/metadata.xml
M  cat/pkg/Manifest
D  cat/other/Manifest
R  cat/pkg/metadata.xml -> cat/pkg2/metadata.xml
";
    assert!(parse_status(listing).is_empty());
    assert_eq!(describe_status(listing), "");
}

#[test]
fn test_realistic_overlay_listing() {
    let listing = "\
M  eclass/bentoo-utils.eclass
A  dev-util/lazygit/lazygit-0.44.1.ebuild
A  dev-util/lazygit/Manifest
R  www-client/zen/zen-1.0.1.ebuild -> www-client/zen/zen-1.0.2.ebuild
R  media-video/obs/obs-31.0.ebuild -> media-video/obs/obs-30.2.ebuild
D  games-util/old/old-1.ebuild
 M net-im/vesktop/vesktop-1.5.3.ebuild
?? scratch/notes.txt
A  net-im/vesktop-bin/vesktop-bin-1.5.3.ebuild
A  net-im/vesktop/vesktop-1.5.3.ebuild
";
    assert_eq!(
        describe_status(listing),
        "add(dev-util/lazygit-0.44.1, net-im/vesktop{,-bin}-1.5.3), \
         del(games-util/old-1), \
         mod_eclass(bentoo-utils.eclass), mod(net-im/vesktop-1.5.3), \
         up(www-client/zen-1.0.1 -> 1.0.2), \
         down(media-video/obs-31.0 -> 30.2)"
    );
}

#[test]
fn test_output_independent_of_line_order() {
    let lines = vec![
        "A  cat/foo/foo-1.0.ebuild",
        "A  cat/foobar/foobar-1.0.ebuild",
        "A  eclass/a.eclass",
        "D  eclass/z.eclass",
        "M  x/y/y-2.ebuild",
        "R  p/q/q-1.ebuild -> p/q/q-2.ebuild",
    ];
    let expected = describe_status(&lines.join("\n"));

    for rotation in 0..lines.len() {
        let mut rotated = lines.clone();
        rotated.rotate_left(rotation);
        assert_eq!(describe_status(&rotated.join("\n")), expected);
    }
    assert_eq!(describe_status(&lines.join("\n")), expected);
}
