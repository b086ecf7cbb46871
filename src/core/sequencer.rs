use std::time::{Duration, Instant};

use crate::core::song::{Song, SONGS};

/// The audio collaborator the sequencer plays through. Triggering while a
/// tone is already sounding must cut over to the new tone, never stack.
pub trait NoteSink {
    fn trigger(&mut self, frequency: f32);
    fn stop(&mut self);
}

/// Timed playback of one song at a time from a fixed library.
///
/// The sequencer is a plain state machine: rest, playing, or paused. It
/// holds at most one pending deadline, and every transition clears that
/// deadline before scheduling a new one, so two playback runs can never
/// advance the index concurrently. Time is injected through the `now`
/// arguments; the UI drives `tick` from its frame loop.
#[derive(Debug)]
pub struct Sequencer {
    songs: &'static [Song],
    current: Option<usize>,
    note_index: usize,
    playing: bool,
    paused: bool,
    pending: Option<Instant>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::with_songs(SONGS)
    }

    pub fn with_songs(songs: &'static [Song]) -> Self {
        Self {
            songs,
            current: None,
            note_index: 0,
            playing: false,
            paused: false,
            pending: None,
        }
    }

    pub fn songs(&self) -> &'static [Song] {
        self.songs
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current.map(|i| &self.songs[i])
    }

    pub fn current_song_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_note_index(&self) -> usize {
        self.note_index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Deadline of the pending step, if one is scheduled. The app uses this
    /// to ask for a repaint no later than the next note boundary.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending
    }

    /// Select a song by library index.
    ///
    /// Selecting the song that is currently playing pauses it (toggle
    /// semantics). Selecting it again while paused restarts it from the
    /// beginning, as does selecting any other song. The playing/paused
    /// asymmetry is deliberate and matches the Songs window's behavior.
    pub fn select_song(&mut self, index: usize, now: Instant, sink: &mut impl NoteSink) {
        if index >= self.songs.len() {
            return;
        }
        if self.current == Some(index) && self.playing && !self.paused {
            self.toggle_pause(now, sink);
            return;
        }
        self.reset(sink);
        self.start(index, now, sink);
    }

    /// Pause if playing, resume if paused. No-op when nothing is loaded.
    ///
    /// Pausing cancels the pending step without advancing the index and
    /// leaves the current tone to ring; resuming re-triggers the note at
    /// the current index rather than skipping to the next one.
    pub fn toggle_pause(&mut self, now: Instant, sink: &mut impl NoteSink) {
        if !self.playing {
            return;
        }
        if self.paused {
            self.paused = false;
            self.trigger_current(now, sink);
        } else {
            self.paused = true;
            self.pending = None;
        }
    }

    /// Restart playback at the next song in the library, wrapping around.
    /// No-op when no song is loaded.
    pub fn next(&mut self, now: Instant, sink: &mut impl NoteSink) {
        let Some(current) = self.current else {
            return;
        };
        let index = (current + 1) % self.songs.len();
        self.reset(sink);
        self.start(index, now, sink);
    }

    /// Restart playback at the previous song in the library, wrapping
    /// around. No-op when no song is loaded.
    pub fn previous(&mut self, now: Instant, sink: &mut impl NoteSink) {
        let Some(current) = self.current else {
            return;
        };
        let index = (current + self.songs.len() - 1) % self.songs.len();
        self.reset(sink);
        self.start(index, now, sink);
    }

    /// Stop playback and return to rest: pending step cancelled, output
    /// silenced, index reset, song cleared.
    pub fn stop(&mut self, sink: &mut impl NoteSink) {
        self.reset(sink);
    }

    /// Manual-override event: a note was played outside the sequencer.
    /// Sequenced and manual playback are mutually exclusive and manual play
    /// wins, so any active or paused playback stops immediately. The caller
    /// delivers this *before* triggering the manual note.
    pub fn interrupt(&mut self, sink: &mut impl NoteSink) {
        if self.playing {
            self.reset(sink);
        }
    }

    /// Fire any step whose deadline has passed. Steps are chained from the
    /// previous deadline rather than from `now`, so pacing does not drift
    /// with the frame rate.
    pub fn tick(&mut self, now: Instant, sink: &mut impl NoteSink) {
        while self.playing && !self.paused {
            let Some(deadline) = self.pending else {
                return;
            };
            if now < deadline {
                return;
            }
            self.pending = None;
            self.advance(deadline, sink);
        }
    }

    fn start(&mut self, index: usize, now: Instant, sink: &mut impl NoteSink) {
        self.current = Some(index);
        self.note_index = 0;
        self.playing = true;
        self.paused = false;
        self.trigger_current(now, sink);
    }

    fn advance(&mut self, at: Instant, sink: &mut impl NoteSink) {
        let Some(song) = self.current_song() else {
            return;
        };
        if self.note_index + 1 >= song.notes.len() {
            // Reaching the end is an implicit stop.
            self.reset(sink);
            return;
        }
        self.note_index += 1;
        self.trigger_current(at, sink);
    }

    fn trigger_current(&mut self, at: Instant, sink: &mut impl NoteSink) {
        let Some(song) = self.current_song() else {
            return;
        };
        let note = song.notes[self.note_index];
        sink.trigger(note.frequency);
        self.pending = Some(at + Duration::from_millis(note.duration_ms));
    }

    fn reset(&mut self, sink: &mut impl NoteSink) {
        self.pending = None;
        sink.stop();
        self.playing = false;
        self.paused = false;
        self.note_index = 0;
        self.current = None;
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum SinkEvent {
        Trigger(f32),
        Stop,
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<SinkEvent>,
    }

    impl NoteSink for RecordingSink {
        fn trigger(&mut self, frequency: f32) {
            self.events.push(SinkEvent::Trigger(frequency));
        }

        fn stop(&mut self) {
            self.events.push(SinkEvent::Stop);
        }
    }

    impl RecordingSink {
        fn triggers(&self) -> Vec<f32> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    SinkEvent::Trigger(f) => Some(*f),
                    SinkEvent::Stop => None,
                })
                .collect()
        }
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn selecting_a_song_triggers_its_first_note_immediately() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.select_song(0, t0, &mut sink);

        assert!(seq.is_playing());
        assert!(!seq.is_paused());
        assert_eq!(seq.current_note_index(), 0);
        assert_eq!(sink.triggers(), vec![261.63]);
    }

    #[test]
    fn twinkle_steps_through_all_notes_on_schedule_then_rests() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();
        let song = SONGS[0];

        seq.select_song(0, t0, &mut sink);

        // Just before the first note ends, nothing new fires.
        seq.tick(t0 + ms(499), &mut sink);
        assert_eq!(sink.triggers(), vec![261.63]);

        // On the boundary, the second note fires.
        seq.tick(t0 + ms(500), &mut sink);
        assert_eq!(sink.triggers(), vec![261.63, 261.63]);
        assert_eq!(seq.current_note_index(), 1);

        seq.tick(t0 + ms(1000), &mut sink);
        assert_eq!(seq.current_note_index(), 2);
        assert_eq!(sink.triggers().last(), Some(&392.00));

        // Run past the end of the whole song.
        let total: u64 = song.notes.iter().map(|n| n.duration_ms).sum();
        seq.tick(t0 + ms(total), &mut sink);

        assert!(!seq.is_playing());
        assert!(!seq.is_paused());
        assert_eq!(seq.current_note_index(), 0);
        assert!(seq.current_song().is_none());
        assert_eq!(sink.events.last(), Some(&SinkEvent::Stop));
        // Every note of the song was triggered exactly once.
        assert_eq!(sink.triggers().len(), song.notes.len());
    }

    #[test]
    fn one_late_tick_catches_up_without_skipping_notes() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.select_song(0, t0, &mut sink);
        // A single tick long after several deadlines have passed fires each
        // elapsed step in order.
        seq.tick(t0 + ms(1700), &mut sink);

        assert_eq!(seq.current_note_index(), 3);
        assert_eq!(sink.triggers(), vec![261.63, 261.63, 392.00, 392.00]);
    }

    #[test]
    fn reselecting_the_playing_song_pauses_without_silencing() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.select_song(0, t0, &mut sink);
        seq.tick(t0 + ms(500), &mut sink);
        sink.events.clear();

        seq.select_song(0, t0 + ms(700), &mut sink);

        assert!(seq.is_playing());
        assert!(seq.is_paused());
        assert_eq!(seq.current_note_index(), 1);
        // Pause cancels the pending step but leaves the tone ringing.
        assert!(sink.events.is_empty());
        assert!(seq.next_deadline().is_none());

        // A later tick must not advance anything while paused.
        seq.tick(t0 + ms(5000), &mut sink);
        assert_eq!(seq.current_note_index(), 1);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn resume_retriggers_the_paused_note_not_the_next_one() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.select_song(0, t0, &mut sink);
        seq.tick(t0 + ms(500), &mut sink);
        seq.toggle_pause(t0 + ms(700), &mut sink);
        sink.events.clear();

        let resume_at = t0 + ms(2000);
        seq.toggle_pause(resume_at, &mut sink);

        assert!(seq.is_playing());
        assert!(!seq.is_paused());
        assert_eq!(seq.current_note_index(), 1);
        assert_eq!(sink.triggers(), vec![261.63]);

        // Scheduling resumes from the resume time, full note duration.
        seq.tick(resume_at + ms(499), &mut sink);
        assert_eq!(seq.current_note_index(), 1);
        seq.tick(resume_at + ms(500), &mut sink);
        assert_eq!(seq.current_note_index(), 2);
    }

    #[test]
    fn reselecting_while_paused_restarts_from_the_beginning() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.select_song(0, t0, &mut sink);
        seq.tick(t0 + ms(1000), &mut sink);
        assert_eq!(seq.current_note_index(), 2);
        seq.toggle_pause(t0 + ms(1200), &mut sink);
        sink.events.clear();

        // Distinct from the toggle-to-pause case above: while paused, the
        // same song restarts rather than resuming.
        seq.select_song(0, t0 + ms(1500), &mut sink);

        assert!(seq.is_playing());
        assert!(!seq.is_paused());
        assert_eq!(seq.current_note_index(), 0);
        assert_eq!(sink.events, vec![SinkEvent::Stop, SinkEvent::Trigger(261.63)]);
    }

    #[test]
    fn selecting_a_different_song_cancels_and_starts_fresh() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.select_song(0, t0, &mut sink);
        seq.tick(t0 + ms(2500), &mut sink);
        assert_eq!(seq.current_note_index(), 5);
        sink.events.clear();

        let switch_at = t0 + ms(2700);
        seq.select_song(1, switch_at, &mut sink);

        assert_eq!(seq.current_song_index(), Some(1));
        assert_eq!(seq.current_note_index(), 0);
        assert_eq!(
            sink.events,
            vec![SinkEvent::Stop, SinkEvent::Trigger(329.63)]
        );

        // Only the new song's schedule is pending: the old song's boundary
        // at t0+3000 fires nothing, the new one's at switch+500 does.
        sink.events.clear();
        seq.tick(t0 + ms(3000), &mut sink);
        assert!(sink.events.is_empty());
        seq.tick(switch_at + ms(500), &mut sink);
        assert_eq!(sink.triggers(), vec![293.66]);
    }

    #[test]
    fn manual_play_interrupts_sequenced_playback() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.select_song(0, t0, &mut sink);
        seq.tick(t0 + ms(500), &mut sink);
        sink.events.clear();

        seq.interrupt(&mut sink);

        assert!(!seq.is_playing());
        assert!(seq.current_song().is_none());
        assert_eq!(seq.current_note_index(), 0);
        assert_eq!(sink.events, vec![SinkEvent::Stop]);

        // No stale step from the old song ever fires.
        sink.events.clear();
        seq.tick(t0 + ms(60_000), &mut sink);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn manual_play_interrupts_paused_playback_too() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.select_song(0, t0, &mut sink);
        seq.toggle_pause(t0 + ms(100), &mut sink);
        seq.interrupt(&mut sink);

        assert!(!seq.is_playing());
        assert!(!seq.is_paused());
        assert!(seq.current_song().is_none());
    }

    #[test]
    fn interrupt_when_idle_touches_nothing() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();

        seq.interrupt(&mut sink);

        assert!(sink.events.is_empty());
        assert!(seq.current_song().is_none());
    }

    #[test]
    fn next_and_previous_wrap_around_the_library() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();
        let last = SONGS.len() - 1;

        seq.select_song(last, t0, &mut sink);
        seq.next(t0 + ms(100), &mut sink);
        assert_eq!(seq.current_song_index(), Some(0));
        assert_eq!(seq.current_note_index(), 0);
        assert!(seq.is_playing());

        seq.previous(t0 + ms(200), &mut sink);
        assert_eq!(seq.current_song_index(), Some(last));
        assert_eq!(seq.current_note_index(), 0);
    }

    #[test]
    fn next_restarts_at_index_zero_regardless_of_position() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.select_song(0, t0, &mut sink);
        seq.tick(t0 + ms(1500), &mut sink);
        assert!(seq.current_note_index() > 0);

        seq.next(t0 + ms(1600), &mut sink);
        assert_eq!(seq.current_song_index(), Some(1));
        assert_eq!(seq.current_note_index(), 0);

        // From paused as well.
        seq.toggle_pause(t0 + ms(1700), &mut sink);
        seq.next(t0 + ms(1800), &mut sink);
        assert_eq!(seq.current_song_index(), Some(2));
        assert!(seq.is_playing());
        assert!(!seq.is_paused());
    }

    #[test]
    fn transport_is_a_noop_with_no_song_loaded() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.next(t0, &mut sink);
        seq.previous(t0, &mut sink);
        seq.toggle_pause(t0, &mut sink);

        assert!(!seq.is_playing());
        assert!(seq.current_song().is_none());
        assert!(sink.events.is_empty());
    }

    #[test]
    fn at_most_one_step_is_pending_across_transitions() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        seq.select_song(0, t0, &mut sink);
        assert!(seq.next_deadline().is_some());

        seq.select_song(1, t0 + ms(100), &mut sink);
        assert_eq!(seq.next_deadline(), Some(t0 + ms(600)));

        seq.toggle_pause(t0 + ms(200), &mut sink);
        assert!(seq.next_deadline().is_none());

        seq.toggle_pause(t0 + ms(300), &mut sink);
        assert_eq!(seq.next_deadline(), Some(t0 + ms(800)));

        seq.stop(&mut sink);
        assert!(seq.next_deadline().is_none());
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut seq = Sequencer::new();
        let mut sink = RecordingSink::default();

        seq.select_song(SONGS.len(), Instant::now(), &mut sink);

        assert!(!seq.is_playing());
        assert!(sink.events.is_empty());
    }
}
