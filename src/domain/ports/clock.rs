//! Clock Port
//!
//! Lets the reconciler wait between polls without tying tests to real time.

use std::time::Duration;

pub trait Clock {
    fn sleep(&self, duration: Duration);
}
