/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! Affine arithmetic on short Weierstrass curves `y^2 = x^3 + a·x + b` over a prime field.
//!
//! Coordinates of every [Point] handed out by a [Curve] are reduced into `[0, p)`. Points coming
//! from outside go through [Curve::point_from_coords] or [Curve::decode_point], which reject
//! anything that does not satisfy the curve equation.

use serde_derive::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::arithmetic::traits::*;
use crate::arithmetic::{One, Zero};
use crate::BigInt;

use super::error::PointError;

/// SEC1 tag of the identity encoding
pub const IDENTITY_TAG: u8 = 0x00;
/// SEC1 tag of an uncompressed affine point
pub const UNCOMPRESSED_TAG: u8 = 0x04;

/// A group element: either the point at infinity or an affine pair
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Point {
    Identity,
    Affine { x: BigInt, y: BigInt },
}

impl Point {
    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Identity)
    }

    pub fn x_coor(&self) -> Option<&BigInt> {
        match self {
            Point::Identity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    pub fn y_coor(&self) -> Option<&BigInt> {
        match self {
            Point::Identity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }
}

impl Zeroize for Point {
    fn zeroize(&mut self) {
        if let Point::Affine { x, y } = self {
            x.zeroize();
            y.zeroize();
        }
        *self = Point::Identity;
    }
}

/// Projective `(X : Y : Z)` standing for `(X / Z^2, Y / Z^3)`
struct Jacobian {
    x: BigInt,
    y: BigInt,
    z: BigInt,
}

impl Jacobian {
    fn infinity() -> Self {
        Jacobian {
            x: BigInt::one(),
            y: BigInt::one(),
            z: BigInt::zero(),
        }
    }
}

/// Domain parameters of a curve together with its group law
#[derive(Clone, Debug)]
pub struct Curve {
    pub(super) name: &'static str,
    pub(super) p: BigInt,
    pub(super) n: BigInt,
    pub(super) a: BigInt,
    pub(super) b: BigInt,
    pub(super) cofactor: BigInt,
    pub(super) generator: Point,
    pub(super) field_len: usize,
    pub(super) sswu_z: BigInt,
    pub(super) hash_to_field_len: usize,
}

impl Curve {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field modulus `p`
    pub fn prime(&self) -> &BigInt {
        &self.p
    }

    /// Order `n` of the generator
    pub fn order(&self) -> &BigInt {
        &self.n
    }

    pub fn a(&self) -> &BigInt {
        &self.a
    }

    pub fn b(&self) -> &BigInt {
        &self.b
    }

    pub fn cofactor(&self) -> &BigInt {
        &self.cofactor
    }

    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// Byte length of a field element
    pub fn field_len(&self) -> usize {
        self.field_len
    }

    /// Byte length of a scalar modulo the group order
    pub fn scalar_len(&self) -> usize {
        (self.n.bit_length() + 7) / 8
    }

    pub fn add(&self, p1: &Point, p2: &Point) -> Point {
        let (x1, y1, x2, y2) = match (p1, p2) {
            (Point::Identity, _) => return p2.clone(),
            (_, Point::Identity) => return p1.clone(),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };
        let p = &self.p;

        let slope = if x1 == x2 {
            // P + (-P), or doubling a point of order two
            if y1 != y2 || y1.is_zero() {
                return Point::Identity;
            }
            let x1_sq = BigInt::mod_mul(x1, x1, p);
            let numerator = BigInt::mod_add(
                &BigInt::mod_mul(&BigInt::from(3u32), &x1_sq, p),
                &self.a,
                p,
            );
            let denominator = BigInt::mod_add(y1, y1, p);
            BigInt::mod_mul(&numerator, &self.invert(&denominator), p)
        } else {
            let numerator = BigInt::mod_sub(y2, y1, p);
            let denominator = BigInt::mod_sub(x2, x1, p);
            BigInt::mod_mul(&numerator, &self.invert(&denominator), p)
        };

        let slope_sq = BigInt::mod_mul(&slope, &slope, p);
        let x3 = BigInt::mod_sub(&BigInt::mod_sub(&slope_sq, x1, p), x2, p);
        let y3 = BigInt::mod_sub(
            &BigInt::mod_mul(&slope, &BigInt::mod_sub(x1, &x3, p), p),
            y1,
            p,
        );
        Point::Affine { x: x3, y: y3 }
    }

    /// Double-and-add, most significant bit first. The running sum is kept in Jacobian
    /// coordinates and converted back to affine once at the end.
    pub fn multiply(&self, point: &Point, k: &BigInt) -> Point {
        if BigInt::is_negative(k) {
            return self.multiply(&self.negate(point), &-k);
        }
        let (x, y) = match point {
            Point::Identity => return Point::Identity,
            Point::Affine { x, y } => (x, y),
        };
        if k.is_zero() {
            return Point::Identity;
        }

        let mut acc = Jacobian {
            x: x.clone(),
            y: y.clone(),
            z: BigInt::one(),
        };
        for i in (0..k.bit_length() - 1).rev() {
            acc = self.jacobian_double(&acc);
            if k.test_bit(i) {
                acc = self.jacobian_add_affine(&acc, x, y);
            }
        }
        self.jacobian_to_affine(&acc)
    }

    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: BigInt::mod_sub(&BigInt::zero(), y, &self.p),
            },
        }
    }

    pub fn subtract(&self, p1: &Point, p2: &Point) -> Point {
        self.add(p1, &self.negate(p2))
    }

    pub fn base_multiply(&self, k: &BigInt) -> Point {
        self.multiply(&self.generator, k)
    }

    /// Checks `y^2 = x^3 + a·x + b (mod p)` with both coordinates reduced. The identity is a
    /// group element and passes.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        let (x, y) = match point {
            Point::Identity => return true,
            Point::Affine { x, y } => (x, y),
        };
        if !self.is_reduced(x) || !self.is_reduced(y) {
            return false;
        }
        let p = &self.p;
        let lhs = BigInt::mod_mul(y, y, p);
        BigInt::mod_sub(&lhs, &self.curve_equation(x), p).is_zero()
    }

    pub fn point_from_coords(&self, x: BigInt, y: BigInt) -> Result<Point, PointError> {
        if !self.is_reduced(&x) || !self.is_reduced(&y) {
            return Err(PointError::CoordinateOutOfRange);
        }
        let point = Point::Affine { x, y };
        if !self.is_on_curve(&point) {
            return Err(PointError::NotOnCurve);
        }
        Ok(point)
    }

    /// SEC1 encoding: `[0x00]` for the identity, `0x04 || X || Y` otherwise, coordinates
    /// left-padded to the field length.
    pub fn encode_point(&self, point: &Point) -> Vec<u8> {
        match point {
            Point::Identity => vec![IDENTITY_TAG],
            Point::Affine { x, y } => {
                let mut bytes = Vec::with_capacity(1 + 2 * self.field_len);
                bytes.push(UNCOMPRESSED_TAG);
                bytes.extend_from_slice(&x.to_bytes_padded(self.field_len));
                bytes.extend_from_slice(&y.to_bytes_padded(self.field_len));
                bytes
            }
        }
    }

    pub fn decode_point(&self, bytes: &[u8]) -> Result<Point, PointError> {
        let field_len = self.field_len;
        match bytes.first() {
            Some(&IDENTITY_TAG) if bytes.len() == 1 => Ok(Point::Identity),
            Some(&UNCOMPRESSED_TAG) if bytes.len() == 1 + 2 * field_len => {
                let x = BigInt::from_bytes(&bytes[1..1 + field_len]);
                let y = BigInt::from_bytes(&bytes[1 + field_len..]);
                self.point_from_coords(x, y)
            }
            tag => Err(PointError::InvalidEncoding {
                tag: tag.copied().unwrap_or(IDENTITY_TAG),
                len: bytes.len(),
            }),
        }
    }

    /// `x^3 + a·x + b (mod p)`
    pub(super) fn curve_equation(&self, x: &BigInt) -> BigInt {
        let p = &self.p;
        let x_cubed = BigInt::mod_mul(&BigInt::mod_mul(x, x, p), x, p);
        let ax = BigInt::mod_mul(&self.a, x, p);
        BigInt::mod_add(&BigInt::mod_add(&x_cubed, &ax, p), &self.b, p)
    }

    /// Field inversion by Fermat's little theorem; maps zero to zero.
    pub(super) fn invert(&self, v: &BigInt) -> BigInt {
        let exponent = &self.p - BigInt::from(2u32);
        BigInt::mod_pow(v, &exponent, &self.p)
    }

    // Jacobian doubling for general a; Z = 0 is the point at infinity
    fn jacobian_double(&self, p1: &Jacobian) -> Jacobian {
        let p = &self.p;
        if p1.z.is_zero() || p1.y.is_zero() {
            return Jacobian::infinity();
        }
        let xx = BigInt::mod_mul(&p1.x, &p1.x, p);
        let yy = BigInt::mod_mul(&p1.y, &p1.y, p);
        let zz = BigInt::mod_mul(&p1.z, &p1.z, p);
        let s = BigInt::mod_mul(&BigInt::from(4u32), &BigInt::mod_mul(&p1.x, &yy, p), p);
        let m = BigInt::mod_add(
            &BigInt::mod_mul(&BigInt::from(3u32), &xx, p),
            &BigInt::mod_mul(&self.a, &BigInt::mod_mul(&zz, &zz, p), p),
            p,
        );
        let x3 = BigInt::mod_sub(&BigInt::mod_mul(&m, &m, p), &BigInt::mod_add(&s, &s, p), p);
        let yyyy8 = BigInt::mod_mul(&BigInt::from(8u32), &BigInt::mod_mul(&yy, &yy, p), p);
        let y3 = BigInt::mod_sub(
            &BigInt::mod_mul(&m, &BigInt::mod_sub(&s, &x3, p), p),
            &yyyy8,
            p,
        );
        let z3 = BigInt::mod_mul(&BigInt::from(2u32), &BigInt::mod_mul(&p1.y, &p1.z, p), p);
        Jacobian { x: x3, y: y3, z: z3 }
    }

    // Mixed addition of a Jacobian and an affine point
    fn jacobian_add_affine(&self, p1: &Jacobian, x2: &BigInt, y2: &BigInt) -> Jacobian {
        let p = &self.p;
        if p1.z.is_zero() {
            return Jacobian {
                x: x2.clone(),
                y: y2.clone(),
                z: BigInt::one(),
            };
        }
        let z1z1 = BigInt::mod_mul(&p1.z, &p1.z, p);
        let u2 = BigInt::mod_mul(x2, &z1z1, p);
        let s2 = BigInt::mod_mul(y2, &BigInt::mod_mul(&p1.z, &z1z1, p), p);
        let h = BigInt::mod_sub(&u2, &p1.x, p);
        let r = BigInt::mod_sub(&s2, &p1.y, p);
        if h.is_zero() {
            return if r.is_zero() {
                self.jacobian_double(p1)
            } else {
                Jacobian::infinity()
            };
        }
        let hh = BigInt::mod_mul(&h, &h, p);
        let hhh = BigInt::mod_mul(&h, &hh, p);
        let v = BigInt::mod_mul(&p1.x, &hh, p);
        let x3 = BigInt::mod_sub(
            &BigInt::mod_sub(&BigInt::mod_mul(&r, &r, p), &hhh, p),
            &BigInt::mod_add(&v, &v, p),
            p,
        );
        let y3 = BigInt::mod_sub(
            &BigInt::mod_mul(&r, &BigInt::mod_sub(&v, &x3, p), p),
            &BigInt::mod_mul(&p1.y, &hhh, p),
            p,
        );
        let z3 = BigInt::mod_mul(&p1.z, &h, p);
        Jacobian { x: x3, y: y3, z: z3 }
    }

    fn jacobian_to_affine(&self, point: &Jacobian) -> Point {
        if point.z.is_zero() {
            return Point::Identity;
        }
        let p = &self.p;
        let z_inv = self.invert(&point.z);
        let z_inv2 = BigInt::mod_mul(&z_inv, &z_inv, p);
        let z_inv3 = BigInt::mod_mul(&z_inv2, &z_inv, p);
        Point::Affine {
            x: BigInt::mod_mul(&point.x, &z_inv2, p),
            y: BigInt::mod_mul(&point.y, &z_inv3, p),
        }
    }

    fn is_reduced(&self, v: &BigInt) -> bool {
        !BigInt::is_negative(v) && v < &self.p
    }
}
