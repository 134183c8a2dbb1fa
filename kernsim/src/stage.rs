//! The concert demo: bands get booked into an aggregate [CapacityPool]
//! with random footprints, then play one after another.
//!
//! Durations are simulated; nothing here sleeps.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{helpe::*, config::StageConfig};

pub const BANDS: [&str; 11] = [
    "Guns and Roses", "AC/DC", "Metallica", "Oasis", "Kiss", "Pantera",
    "Rolling Stones", "The Doors", "Nirvana", "Limp Bizkit", "Green Day",
];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GigStatus {
    Waiting,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Gig {
    pub ticket:         Pid,
    pub band:           &'static str,
    pub size:           usize,
    pub duration_ms:    u64,
    pub status:         GigStatus,
}

pub struct Stage<R: Rng = StdRng> {
    pool:           CapacityPool,
    lineup:         VecDeque<Gig>,
    next_ticket:    Pid,
    rng:            R,
}

impl Stage<StdRng> {
    /// A stage seeded from `config.seed`, or from the OS if none is given.
    pub fn new(config: &StageConfig) -> Self {
        let rng = match config.seed {
            Some(seed)  => StdRng::seed_from_u64(seed),
            None        => StdRng::from_entropy(),
        };
        Self::with_rng(config.stage_size, rng)
    }
}

impl<R: Rng> Stage<R> {
    pub fn with_rng(capacity: usize, rng: R) -> Self {
        Self {
            pool:           CapacityPool::new(capacity),
            lineup:         VecDeque::new(),
            next_ticket:    1,
            rng,
        }
    }

    /// Books a random band with a random footprint. Nothing is booked if
    /// the pool cannot take it.
    pub fn book(&mut self) -> Result<&Gig, SimError> {
        let band = BANDS[self.rng.gen_range(0..BANDS.len())];
        let size = self.rng.gen_range(50..=300);
        let duration_ms = self.rng.gen_range(1000..=3000);
        let ticket = self.next_ticket;
        self.pool.allocate(ticket, size)?;
        self.next_ticket += 1;
        info!(
            "Process '{band}' created with size {size}MB and will run for {:.2} seconds.",
            duration_ms as f64 / 1000.0
        );
        self.lineup.push_back(Gig {
            ticket,
            band,
            size,
            duration_ms,
            status: GigStatus::Waiting,
        });

        Ok(&self.lineup[self.lineup.len() - 1])
    }

    /// Plays every waiting gig in booking order, releasing its memory as
    /// soon as it is done. Returns the finished gigs.
    pub fn perform(&mut self) -> Vec<Gig> {
        let mut played = vec![];
        while let Some(mut gig) = self.lineup.pop_front() {
            gig.status = GigStatus::Running;
            debug!(ticket = gig.ticket, status = ?gig.status, duration_ms = gig.duration_ms);
            info!("Running process: {} ({}MB)", gig.band, gig.size);
            gig.status = GigStatus::Completed;
            self.pool.free(gig.ticket);
            info!("Process {} completed", gig.band);
            played.push(gig);
        }

        played
    }

    pub fn lineup(&self) -> impl Iterator<Item = &Gig> + '_ {
        self.lineup.iter()
    }

    pub fn pool(&self) -> &CapacityPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(capacity: usize, seed: u64) -> Stage {
        Stage::with_rng(capacity, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn bookings_stay_in_range() {
        let mut s = stage(10_000, 7);
        for _ in 0..20 {
            let g = s.book().unwrap();
            assert!((50..=300).contains(&g.size));
            assert!((1000..=3000).contains(&g.duration_ms));
            assert!(BANDS.contains(&g.band));
            assert_eq!(g.status, GigStatus::Waiting);
        }
        let booked: usize = s.lineup().map(|g| g.size).sum();
        assert_eq!(s.pool().used(), booked);
    }

    #[test]
    fn full_stage_refuses_without_side_effects() {
        let mut s = stage(1024, 11);
        let err = loop {
            match s.book() {
                Ok(_)   => continue,
                Err(e)  => break e,
            }
        };
        assert!(matches!(err, SimError::InsufficientMemory { .. }));
        let booked: usize = s.lineup().map(|g| g.size).sum();
        assert_eq!(s.pool().used(), booked);
        assert!(booked <= 1024);
    }

    #[test]
    fn performing_empties_the_stage() {
        let mut s = stage(1024, 3);
        s.book().unwrap();
        s.book().unwrap();
        let tickets = s.lineup().map(|g| g.ticket).collect_vec();
        let played = s.perform();
        assert_eq!(played.iter().map(|g| g.ticket).collect_vec(), tickets);
        assert!(played.iter().all(|g| g.status == GigStatus::Completed));
        assert_eq!(s.pool().used(), 0);
        assert_eq!(s.lineup().count(), 0);
    }

    #[test]
    fn same_seed_same_show() {
        let mut a = stage(1024, 99);
        let mut b = stage(1024, 99);
        let ga = a.book().unwrap().clone();
        let gb = b.book().unwrap().clone();
        assert_eq!((ga.band, ga.size, ga.duration_ms), (gb.band, gb.size, gb.duration_ms));
    }
}
