use std::iter;

use p256::elliptic_curve::ff::{Field, PrimeField};
use p256::elliptic_curve::group::Curve as _;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;

use crate::arithmetic::*;

use super::secp256_r1::secp256r1;
use super::short_weierstrass::{Curve, Point};

fn random_point(curve: &Curve) -> Point {
    let k = BigInt::sample_below(curve.order()).unwrap();
    curve.base_multiply(&k)
}

fn point_from_hex(curve: &Curve, x: &str, y: &str) -> Point {
    curve
        .point_from_coords(BigInt::from_hex(x).unwrap(), BigInt::from_hex(y).unwrap())
        .unwrap()
}

#[test]
fn generator_is_on_curve() {
    let curve = secp256r1();
    assert!(curve.is_on_curve(curve.generator()));
}

#[test]
fn identity_arithmetic() {
    let curve = secp256r1();
    let point = random_point(&curve);

    assert_eq!(curve.add(&Point::Identity, &point), point, "O + P = P");
    assert_eq!(curve.add(&point, &Point::Identity), point, "P + O = P");
    assert!(curve.add(&point, &curve.negate(&point)).is_identity(), "P + (-P) = O");
    assert!(curve.subtract(&point, &point).is_identity(), "P - P = O");
    assert!(curve.multiply(&point, &BigInt::zero()).is_identity(), "P * 0 = O");
    assert_eq!(curve.multiply(&point, &BigInt::one()), point, "P * 1 = P");
    assert!(
        curve.multiply(&Point::Identity, &BigInt::from(12345u32)).is_identity(),
        "O * s = O"
    );
    assert!(curve.negate(&Point::Identity).is_identity());
}

// Reference multiples of the P-256 base point
#[test]
fn known_multiples_of_generator() {
    let curve = secp256r1();
    let two_g = point_from_hex(
        &curve,
        "7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978",
        "07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1",
    );
    let three_g = point_from_hex(
        &curve,
        "5ecbe4d1a6330a44c8f7ef951d4bf165e6c6b721efada985fb41661bc6e7fd6c",
        "8734640c4998ff7e374b06ce1a64a2ecd82ab036384fb83d9a79b127a27d5032",
    );

    let g = curve.generator();
    assert_eq!(curve.base_multiply(&BigInt::from(2u32)), two_g);
    assert_eq!(curve.add(g, g), two_g, "G + G = 2G");
    assert_eq!(curve.base_multiply(&BigInt::from(3u32)), three_g);
    assert_eq!(curve.add(&two_g, g), three_g, "2G + G = 3G");
    assert_eq!(curve.subtract(&three_g, g), two_g, "3G - G = 2G");
}

#[test]
fn order_edges() {
    let curve = secp256r1();
    let n = curve.order().clone();
    let g = curve.generator();

    assert!(curve.base_multiply(&n).is_identity(), "n * G = O");
    assert_eq!(
        curve.base_multiply(&(&n - BigInt::one())),
        curve.negate(g),
        "(n - 1) * G = -G"
    );
    assert_eq!(curve.base_multiply(&(&n + BigInt::one())), *g, "(n + 1) * G = G");
    assert_eq!(curve.base_multiply(&BigInt::from(-1)), curve.negate(g), "-1 * G = -G");
}

#[test]
fn addition_matches_multiplication() {
    let curve = secp256r1();
    let point = random_point(&curve);
    let sums = iter::successors(Some(point.clone()), |p| Some(curve.add(p, &point)))
        .take(10)
        .collect::<Vec<_>>();
    for (i, sum) in sums.iter().enumerate() {
        assert_eq!(
            *sum,
            curve.multiply(&point, &BigInt::from(i as u32 + 1)),
            "P + ... + P = {} * P",
            i + 1
        );
    }
}

#[test]
fn scalar_multiplication_distributes() {
    let curve = secp256r1();
    let mut rng = StdRng::seed_from_u64(42);
    let a = BigInt::sample_below_with_rng(curve.order(), &mut rng).unwrap();
    let b = BigInt::sample_below_with_rng(curve.order(), &mut rng).unwrap();

    let lhs = curve.base_multiply(&BigInt::mod_add(&a, &b, curve.order()));
    let rhs = curve.add(&curve.base_multiply(&a), &curve.base_multiply(&b));
    assert_eq!(lhs, rhs, "(a + b) G = aG + bG");

    let ab = BigInt::mod_mul(&a, &b, curve.order());
    assert_eq!(
        curve.multiply(&curve.base_multiply(&a), &b),
        curve.base_multiply(&ab),
        "b (aG) = (ab) G"
    );
}

#[test]
fn matches_reference_implementation() {
    let curve = secp256r1();
    for _ in 0..8 {
        let reference_scalar = p256::Scalar::random(&mut OsRng);
        let k = BigInt::from_bytes(&reference_scalar.to_repr());
        let expected = (p256::ProjectivePoint::GENERATOR * reference_scalar)
            .to_affine()
            .to_encoded_point(false);
        let actual = curve.encode_point(&curve.base_multiply(&k));
        assert_eq!(actual, expected.as_bytes());
    }
}

#[test]
fn off_curve_points_are_rejected() {
    let curve = secp256r1();
    let (x, y) = match curve.generator() {
        Point::Affine { x, y } => (x.clone(), y.clone()),
        Point::Identity => unreachable!(),
    };

    let tweaked = Point::Affine {
        x: x.clone(),
        y: &y + BigInt::one(),
    };
    assert!(!curve.is_on_curve(&tweaked));
    assert!(curve
        .point_from_coords(x.clone(), &y + BigInt::one())
        .is_err());

    let unreduced = Point::Affine {
        x: &x + curve.prime(),
        y: y.clone(),
    };
    assert!(!curve.is_on_curve(&unreduced));
}

#[test]
fn encoding_round_trip() {
    let curve = secp256r1();
    let point = random_point(&curve);
    let bytes = curve.encode_point(&point);
    assert_eq!(bytes.len(), 65);
    assert_eq!(bytes[0], 0x04);
    assert_eq!(curve.decode_point(&bytes).unwrap(), point);

    assert_eq!(curve.encode_point(&Point::Identity), vec![0x00]);
    assert!(curve.decode_point(&[0x00]).unwrap().is_identity());
}

#[test]
fn malformed_encodings_are_rejected() {
    use super::error::PointError;

    let curve = secp256r1();
    let mut bytes = curve.encode_point(&random_point(&curve));

    assert!(matches!(
        curve.decode_point(&bytes[..64]),
        Err(PointError::InvalidEncoding { tag: 0x04, len: 64 })
    ));
    assert!(matches!(
        curve.decode_point(&[]),
        Err(PointError::InvalidEncoding { len: 0, .. })
    ));

    bytes[0] = 0x05;
    assert!(matches!(
        curve.decode_point(&bytes),
        Err(PointError::InvalidEncoding { tag: 0x05, .. })
    ));

    bytes[0] = 0x04;
    bytes[64] ^= 0x01;
    assert_eq!(curve.decode_point(&bytes), Err(PointError::NotOnCurve));

    let mut out_of_range = vec![0x04];
    out_of_range.extend_from_slice(&[0xff; 64]);
    assert_eq!(
        curve.decode_point(&out_of_range),
        Err(PointError::CoordinateOutOfRange)
    );
}
