// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use assert_cmd::Command;
use predicates::prelude::*;

const RAY_ALONG_Z: &str = "Ray[StartPoint <0, 0, -5> | Direction <0, 0, 1>]";

fn orrery() -> Command {
    let mut cmd = Command::cargo_bin("orrery").expect("binary built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn intersects_a_ray_with_a_sphere() {
    orrery()
        .args(["intersect", "Sphere[Radius 1]", RAY_ALONG_Z])
        .assert()
        .success()
        .stdout("first <0, 0, -1>\nsecond <0, 0, 1>\n");
}

#[test]
fn cuboid_slab_crossing() {
    orrery()
        .args([
            "intersect",
            "Cuboid[Width 7.2 | Height 13.6 | Depth 1.4]",
            "Ray[StartPoint <100, 0, 0> | Direction <-1, 0, 0>]",
            "--precision",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("first <3.6, 0.0, 0.0>"))
        .stdout(predicate::str::contains("second <-3.6, 0.0, 0.0>"));
}

#[test]
fn misses_print_none() {
    orrery()
        .args([
            "intersect",
            "Sphere[Radius 1]",
            "Ray[StartPoint <0, 5, -5> | Direction <0, 0, 1>]",
        ])
        .assert()
        .success()
        .stdout("none\n");
}

#[test]
fn distance_honours_precision() {
    orrery()
        .args(["--precision", "3", "distance", "Sphere[Radius 1]", "<0, 4, 0>"])
        .assert()
        .success()
        .stdout("3.000\n");
}

#[test]
fn splits_a_sphere_into_a_circle() {
    orrery()
        .args([
            "split",
            "Plane[Normal <0, 1, 0> | PointClosestToOrigin <0, 0, 0>]",
            "Sphere[Radius 2]",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("radius 2"));
}

#[test]
fn rotates_with_negative_degrees() {
    orrery()
        .args(["rotate", "<1, 0, 0>", "--degrees", "-90", "--precision", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<"));
}

#[test]
fn malformed_operands_fail_with_context() {
    orrery()
        .args(["distance", "Sphere[Radius]", "<0, 0, 0>"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing Sphere"));
}

#[test]
fn unsupported_pairs_fail() {
    orrery()
        .args(["split", "Sphere[Radius 1]", "<0, 0, 0>"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not support"));
}
