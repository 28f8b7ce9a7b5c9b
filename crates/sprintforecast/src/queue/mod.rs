//! Per-ticket forecasting: the discrete-event queue and the empirical
//! bootstrap, behind one [`ForecastEngine`] capability.

mod engine;
mod simulator;

pub use engine::{EmpiricalEngine, ForecastEngine, QueueForecastEngine};
pub use simulator::{PathOutcome, QueueSimulator};

use rand_xoshiro::Xoshiro256PlusPlus;
use sprintforecast_core::RandomStream;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Run `f` once per path on substream `i` of `stream`, collecting in path order.
pub(crate) fn map_paths<T, F>(paths: usize, stream: &RandomStream, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&mut Xoshiro256PlusPlus) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        (0..paths)
            .into_par_iter()
            .map(|i| f(&mut stream.substream(i as u64)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..paths)
            .map(|i| f(&mut stream.substream(i as u64)))
            .collect()
    }
}
