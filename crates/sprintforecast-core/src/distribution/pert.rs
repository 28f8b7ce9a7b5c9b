//! Beta-PERT sampling of three-point estimates.
//!
//! A triad (o, m, p) maps to Beta(a, b) on [0, 1] with
//! `a = 1 + 4(m − o)/(p − o)` and `b = 1 + 4(p − m)/(p − o)`; each draw is
//! rescaled affinely onto [o, p].

use rand::Rng;
use rand_distr::{Beta, Distribution as _};

use crate::error::{Error, Result};
use crate::rng::{fill_rows, RandomStream};
use crate::ticket::Ticket;

/// Sampler for one ticket's effort.
#[derive(Debug, Clone)]
pub struct Pert {
    beta: Beta<f64>,
    low: f64,
    span: f64,
}

impl Pert {
    /// Build the sampler for `ticket`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the ticket's triad is not strictly
    /// ordered. [`Ticket::new`] already enforces this, so failure here means
    /// the invariant was broken elsewhere; it is reported, not masked.
    pub fn from_ticket(ticket: &Ticket) -> Result<Self> {
        ticket.validate()?;
        let (a, b) = ticket.beta_params();
        let beta = Beta::new(a, b)
            .map_err(|e| Error::validation("triad", format!("ticket #{}: {e}", ticket.number())))?;
        Ok(Self {
            beta,
            low: ticket.optimistic(),
            span: ticket.pessimistic() - ticket.optimistic(),
        })
    }

    /// One effort draw in hours.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.low + self.span * self.beta.sample(rng)
    }

    /// `n` independent effort draws.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}

/// Batched PERT sampler over a whole ticket set.
///
/// Produces a row-major `paths × tickets` matrix where row `i` is drawn from
/// substream `i` of the supplied [`RandomStream`].
#[derive(Debug, Clone)]
pub struct PertBatch {
    samplers: Vec<Pert>,
}

impl PertBatch {
    /// Build samplers for every ticket, in order.
    pub fn new(tickets: &[Ticket]) -> Result<Self> {
        let samplers = tickets.iter().map(Pert::from_ticket).collect::<Result<Vec<_>>>()?;
        Ok(Self { samplers })
    }

    /// Number of tickets (matrix columns).
    pub fn len(&self) -> usize {
        self.samplers.len()
    }

    /// Whether the batch covers no tickets.
    pub fn is_empty(&self) -> bool {
        self.samplers.is_empty()
    }

    /// Fill one path's row with one draw per ticket.
    #[inline]
    pub fn fill_row<R: Rng + ?Sized>(&self, rng: &mut R, row: &mut [f64]) {
        debug_assert_eq!(row.len(), self.samplers.len());
        for (cell, sampler) in row.iter_mut().zip(&self.samplers) {
            *cell = sampler.draw(rng);
        }
    }

    /// Draw the full `paths × tickets` effort matrix.
    pub fn sample_matrix(&self, paths: usize, stream: &RandomStream) -> Vec<f64> {
        let mut matrix = vec![0.0; paths * self.samplers.len()];
        fill_rows(&mut matrix, self.samplers.len(), stream, |rng, row| self.fill_row(rng, row));
        matrix
    }
}
