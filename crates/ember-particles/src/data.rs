//! Structure-of-arrays particle store with an alive/dead partition

use glam::Vec4;

/// Bookkeeping bytes charged per particle on top of the attribute arrays
const PER_PARTICLE_OVERHEAD: usize = std::mem::size_of::<bool>() + 2 * std::mem::size_of::<usize>();

/// Fixed-capacity particle storage.
///
/// Every attribute lives in its own array of length [`count`](Self::count),
/// indexed by the same particle id. Indices `[0, alive_count)` are alive and
/// `[alive_count, count)` are dead. Dead slots keep whatever was written last
/// and must not be read until a generator rewrites them.
///
/// The `time` attribute packs four values:
/// - `x` remaining life in seconds
/// - `y` total life in seconds
/// - `z` normalized age, 0 at birth and 1 at death
/// - `w` reciprocal of the total life
pub struct ParticleData {
    count: usize,
    count_alive: usize,
    pub(crate) position: Vec<Vec4>,
    pub(crate) velocity: Vec<Vec4>,
    pub(crate) acceleration: Vec<Vec4>,
    pub(crate) color: Vec<Vec4>,
    pub(crate) start_color: Vec<Vec4>,
    pub(crate) end_color: Vec<Vec4>,
    pub(crate) time: Vec<Vec4>,
}

impl ParticleData {
    /// Allocates zeroed storage for `count` particles, none of them alive.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            count_alive: 0,
            position: vec![Vec4::ZERO; count],
            velocity: vec![Vec4::ZERO; count],
            acceleration: vec![Vec4::ZERO; count],
            color: vec![Vec4::ZERO; count],
            start_color: vec![Vec4::ZERO; count],
            end_color: vec![Vec4::ZERO; count],
            time: vec![Vec4::ZERO; count],
        }
    }

    /// Total capacity
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn alive_count(&self) -> usize {
        self.count_alive
    }

    /// Drops every alive particle without touching their memory.
    pub fn reset(&mut self) {
        self.count_alive = 0;
    }

    /// Removes particle `id` by copying the last alive record over it.
    ///
    /// The particle that used to sit at `alive_count - 1` now lives at `id`,
    /// so callers iterating while killing must re-read
    /// [`alive_count`](Self::alive_count) afterwards.
    pub fn kill(&mut self, id: usize) {
        debug_assert!(id < self.count_alive, "kill({id}) outside alive range");
        let last = self.count_alive - 1;
        self.copy_record(last, id);
        self.count_alive = last;
    }

    /// Marks the first dead slot as alive.
    ///
    /// `id` must equal the current alive count: emitters wake the range their
    /// generators just filled, in ascending order.
    pub fn wake(&mut self, id: usize) {
        debug_assert_eq!(id, self.count_alive, "wake must extend the alive range");
        debug_assert!(self.count_alive < self.count, "wake past capacity");
        self.count_alive += 1;
    }

    fn copy_record(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        self.position[to] = self.position[from];
        self.velocity[to] = self.velocity[from];
        self.acceleration[to] = self.acceleration[from];
        self.color[to] = self.color[from];
        self.start_color[to] = self.start_color[from];
        self.end_color[to] = self.end_color[from];
        self.time[to] = self.time[from];
    }

    /// Zeroes acceleration over the whole capacity, dead slots included.
    pub fn zero_accelerations(&mut self) {
        self.acceleration.fill(Vec4::ZERO);
    }

    /// Approximate heap footprint in bytes, for telemetry.
    pub fn memory_usage(&self) -> usize {
        self.count * (7 * std::mem::size_of::<Vec4>() + PER_PARTICLE_OVERHEAD)
    }

    // ── Per-index accessors ──

    pub fn position(&self, i: usize) -> Vec4 {
        self.position[i]
    }

    pub fn set_position(&mut self, i: usize, position: Vec4) {
        self.position[i] = position;
    }

    pub fn inc_position(&mut self, i: usize, amount: Vec4) {
        self.position[i] += amount;
    }

    pub fn velocity(&self, i: usize) -> Vec4 {
        self.velocity[i]
    }

    pub fn set_velocity(&mut self, i: usize, velocity: Vec4) {
        self.velocity[i] = velocity;
    }

    pub fn inc_velocity(&mut self, i: usize, amount: Vec4) {
        self.velocity[i] += amount;
    }

    pub fn dec_velocity(&mut self, i: usize, amount: Vec4) {
        self.velocity[i] -= amount;
    }

    pub fn acceleration(&self, i: usize) -> Vec4 {
        self.acceleration[i]
    }

    pub fn set_acceleration(&mut self, i: usize, acceleration: Vec4) {
        self.acceleration[i] = acceleration;
    }

    pub fn inc_acceleration(&mut self, i: usize, amount: Vec4) {
        self.acceleration[i] += amount;
    }

    pub fn color(&self, i: usize) -> Vec4 {
        self.color[i]
    }

    pub fn set_color(&mut self, i: usize, color: Vec4) {
        self.color[i] = color;
    }

    pub fn start_color(&self, i: usize) -> Vec4 {
        self.start_color[i]
    }

    pub fn set_start_color(&mut self, i: usize, color: Vec4) {
        self.start_color[i] = color;
    }

    pub fn end_color(&self, i: usize) -> Vec4 {
        self.end_color[i]
    }

    pub fn set_end_color(&mut self, i: usize, color: Vec4) {
        self.end_color[i] = color;
    }

    pub fn time(&self, i: usize) -> Vec4 {
        self.time[i]
    }

    pub fn set_time(&mut self, i: usize, time: Vec4) {
        self.time[i] = time;
    }

    // ── Alive-range views for renderers ──

    pub fn alive_positions(&self) -> &[Vec4] {
        &self.position[..self.count_alive]
    }

    pub fn alive_velocities(&self) -> &[Vec4] {
        &self.velocity[..self.count_alive]
    }

    pub fn alive_accelerations(&self) -> &[Vec4] {
        &self.acceleration[..self.count_alive]
    }

    pub fn alive_colors(&self) -> &[Vec4] {
        &self.color[..self.count_alive]
    }

    pub fn alive_times(&self) -> &[Vec4] {
        &self.time[..self.count_alive]
    }

    /// Alive positions as raw bytes, ready for a vertex buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.alive_positions())
    }

    /// Alive colors as raw bytes, ready for a vertex buffer upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.alive_colors())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Wakes `n` particles, tagging each with its spawn index in `position.x`.
    pub(crate) fn spawn_tagged(data: &mut ParticleData, n: usize) {
        for _ in 0..n {
            let id = data.alive_count();
            data.set_position(id, Vec4::new(id as f32, 0.0, 0.0, 1.0));
            data.set_time(id, Vec4::new(1.0, 1.0, 0.0, 1.0));
            data.wake(id);
        }
    }

    #[test]
    fn new_store_is_empty_and_zeroed() {
        let data = ParticleData::new(8);
        assert_eq!(data.count(), 8);
        assert_eq!(data.alive_count(), 0);
        for i in 0..8 {
            assert_eq!(data.position(i), Vec4::ZERO);
            assert_eq!(data.time(i), Vec4::ZERO);
        }
        assert!(data.alive_positions().is_empty());
    }

    #[test]
    fn kill_is_swap_remove() {
        let mut data = ParticleData::new(5);
        spawn_tagged(&mut data, 3);
        data.set_velocity(2, Vec4::new(0.0, 7.0, 0.0, 0.0));

        data.kill(0);

        assert_eq!(data.alive_count(), 2);
        assert_eq!(data.position(0).x, 2.0);
        assert_eq!(data.velocity(0).y, 7.0);
        assert_eq!(data.position(1).x, 1.0);
    }

    #[test]
    fn kill_last_alive_just_shrinks() {
        let mut data = ParticleData::new(4);
        spawn_tagged(&mut data, 3);
        data.kill(2);
        assert_eq!(data.alive_count(), 2);
        assert_eq!(data.position(0).x, 0.0);
        assert_eq!(data.position(1).x, 1.0);
    }

    #[test]
    fn partition_invariant_under_mixed_wake_and_kill() {
        let mut data = ParticleData::new(16);
        let mut expected_alive = 0usize;
        for round in 0..20 {
            let wake = (round * 3) % 5;
            let room = data.count() - data.alive_count();
            let wake = wake.min(room);
            spawn_tagged(&mut data, wake);
            expected_alive += wake;

            if data.alive_count() > 0 {
                data.kill(round % data.alive_count());
                expected_alive -= 1;
            }
            assert_eq!(data.alive_count(), expected_alive);
            assert!(data.alive_count() <= data.count());
            for t in data.alive_times() {
                // every alive slot was written by spawn_tagged
                assert_eq!(t.y, 1.0);
            }
        }
    }

    #[test]
    fn reset_keeps_capacity_and_memory() {
        let mut data = ParticleData::new(4);
        spawn_tagged(&mut data, 3);
        data.reset();
        assert_eq!(data.alive_count(), 0);
        assert_eq!(data.count(), 4);
        // stale record still present, just not alive
        assert_eq!(data.position(2).x, 2.0);
    }

    #[test]
    fn zero_accelerations_covers_dead_slots() {
        let mut data = ParticleData::new(3);
        for i in 0..3 {
            data.set_acceleration(i, Vec4::ONE);
        }
        spawn_tagged(&mut data, 1);
        data.zero_accelerations();
        for i in 0..3 {
            assert_eq!(data.acceleration(i), Vec4::ZERO);
        }
    }

    #[test]
    fn inc_and_dec_accessors() {
        let mut data = ParticleData::new(1);
        data.inc_position(0, Vec4::new(1.0, 2.0, 3.0, 0.0));
        data.inc_velocity(0, Vec4::splat(2.0));
        data.dec_velocity(0, Vec4::splat(0.5));
        data.inc_acceleration(0, Vec4::Y);
        assert_eq!(data.position(0), Vec4::new(1.0, 2.0, 3.0, 0.0));
        assert_eq!(data.velocity(0), Vec4::splat(1.5));
        assert_eq!(data.acceleration(0), Vec4::Y);
    }

    #[test]
    fn memory_usage_scales_with_capacity() {
        let small = ParticleData::new(10).memory_usage();
        let large = ParticleData::new(20).memory_usage();
        assert_eq!(large, small * 2);
        assert!(small >= 10 * 7 * 16);
    }

    #[test]
    fn byte_views_cover_alive_range_only() {
        let mut data = ParticleData::new(6);
        spawn_tagged(&mut data, 2);
        assert_eq!(data.position_bytes().len(), 2 * 16);
        assert_eq!(data.color_bytes().len(), 2 * 16);
    }
}
