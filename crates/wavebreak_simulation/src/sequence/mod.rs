//! Timed sequences — кооперативные фазовые машины.
//!
//! Каждая sequence — упорядоченный список фаз с явным курсором.
//! Точки приостановки хранятся в данных (а не в continuation):
//! - `PhaseWait::For(secs)` — ждём elapsed
//! - `PhaseWait::Until { timeout }` — ждём внешний `resolve()`, ограничено timeout
//! - `PhaseWait::Instant` — фаза-граница (событие без длительности)
//!
//! Владелец (система) тикает sequence раз в кадр с delta своего `TimeDomain`
//! и реагирует на возвращённые `SequenceEvent`. Отмена = выбросить курсор.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;


/// Какие часы двигают sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TimeDomain {
    /// Масштабируемое время симуляции (`Time<Virtual>`), замирает в hit-stop
    Simulation,
    /// Wall-clock (`Time<Real>`), тикает даже при time scale = 0
    Real,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseWait {
    Instant,
    For(f32),
    Until { timeout: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequenceEvent<P> {
    Entered(P),
    Finished(P),
    /// `Until` фаза не дождалась resolve() — принудительный выход
    TimedOut(P),
    Completed,
}

#[derive(Debug, Clone)]
struct PhaseStep<P> {
    phase: P,
    wait: PhaseWait,
}

#[derive(Debug, Clone)]
pub struct TimedSequence<P> {
    steps: Vec<PhaseStep<P>>,
    cursor: usize,
    phase_elapsed: f32,
    total_elapsed: f32,
    domain: TimeDomain,
    started: bool,
    cancelled: bool,
}

impl<P: Copy + PartialEq + std::fmt::Debug> TimedSequence<P> {
    pub fn new(domain: TimeDomain) -> Self {
        Self {
            steps: Vec::new(),
            cursor: 0,
            phase_elapsed: 0.0,
            total_elapsed: 0.0,
            domain,
            started: false,
            cancelled: false,
        }
    }

    /// Builder: добавить фазу в конец
    pub fn then(mut self, phase: P, wait: PhaseWait) -> Self {
        let wait = match wait {
            PhaseWait::For(secs) => PhaseWait::For(secs.max(0.0)),
            PhaseWait::Until { timeout } => PhaseWait::Until {
                timeout: timeout.max(0.0),
            },
            PhaseWait::Instant => PhaseWait::Instant,
        };
        self.steps.push(PhaseStep { phase, wait });
        self
    }

    pub fn domain(&self) -> TimeDomain {
        self.domain
    }

    pub fn is_complete(&self) -> bool {
        self.cancelled || self.cursor >= self.steps.len()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn current_phase(&self) -> Option<P> {
        if self.is_complete() {
            return None;
        }
        self.steps.get(self.cursor).map(|step| step.phase)
    }

    /// Прогресс текущей фазы в [0, 1]
    pub fn phase_progress(&self) -> f32 {
        let Some(step) = self.steps.get(self.cursor) else {
            return 1.0;
        };
        match step.wait {
            PhaseWait::Instant => 1.0,
            PhaseWait::For(secs) | PhaseWait::Until { timeout: secs } => {
                if secs <= 0.0 {
                    1.0
                } else {
                    (self.phase_elapsed / secs).clamp(0.0, 1.0)
                }
            }
        }
    }

    pub fn phase_elapsed(&self) -> f32 {
        self.phase_elapsed
    }

    pub fn total_elapsed(&self) -> f32 {
        self.total_elapsed
    }

    /// Суммарная длительность всех `For` фаз (Until считается по timeout)
    pub fn total_duration(&self) -> f32 {
        self.steps
            .iter()
            .map(|step| match step.wait {
                PhaseWait::Instant => 0.0,
                PhaseWait::For(secs) | PhaseWait::Until { timeout: secs } => secs,
            })
            .sum()
    }

    /// Продвинуть sequence на `delta` секунд своего домена.
    ///
    /// За один тик может пройти несколько фаз (Instant фазы, большой delta).
    pub fn tick(&mut self, delta: f32) -> Vec<SequenceEvent<P>> {
        let mut events = Vec::new();
        if self.is_complete() {
            return events;
        }

        self.enter_if_needed(&mut events);

        let mut remaining = delta.max(0.0);
        self.total_elapsed += remaining;

        while let Some(&PhaseStep { phase, wait }) = self.steps.get(self.cursor) {
            match wait {
                PhaseWait::Instant => {
                    self.finish_phase(SequenceEvent::Finished(phase), &mut events);
                }
                PhaseWait::For(secs) => {
                    let needed = secs - self.phase_elapsed;
                    if remaining >= needed {
                        remaining -= needed.max(0.0);
                        self.finish_phase(SequenceEvent::Finished(phase), &mut events);
                    } else {
                        self.phase_elapsed += remaining;
                        break;
                    }
                }
                PhaseWait::Until { timeout } => {
                    let needed = timeout - self.phase_elapsed;
                    if remaining >= needed {
                        remaining -= needed.max(0.0);
                        self.finish_phase(SequenceEvent::TimedOut(phase), &mut events);
                    } else {
                        self.phase_elapsed += remaining;
                        break;
                    }
                }
            }
        }

        events
    }

    /// Внешнее условие выполнено: закрыть текущую фазу (обычно `Until`).
    pub fn resolve(&mut self) -> Vec<SequenceEvent<P>> {
        let mut events = Vec::new();
        if self.is_complete() {
            return events;
        }

        self.enter_if_needed(&mut events);

        if let Some(&PhaseStep { phase, .. }) = self.steps.get(self.cursor) {
            self.finish_phase(SequenceEvent::Finished(phase), &mut events);
        }

        // Instant фазы сразу после resolved — проходим без времени
        while let Some(&PhaseStep { phase, wait }) = self.steps.get(self.cursor) {
            if wait != PhaseWait::Instant {
                break;
            }
            self.finish_phase(SequenceEvent::Finished(phase), &mut events);
        }

        events
    }

    /// Отмена: continuation выбрасывается, `Completed` не отправляется.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn enter_if_needed(&mut self, events: &mut Vec<SequenceEvent<P>>) {
        if self.started {
            return;
        }
        self.started = true;
        if let Some(step) = self.steps.first() {
            events.push(SequenceEvent::Entered(step.phase));
        } else {
            events.push(SequenceEvent::Completed);
        }
    }

    fn finish_phase(&mut self, exit: SequenceEvent<P>, events: &mut Vec<SequenceEvent<P>>) {
        events.push(exit);
        self.cursor += 1;
        self.phase_elapsed = 0.0;

        match self.steps.get(self.cursor) {
            Some(next) => events.push(SequenceEvent::Entered(next.phase)),
            None => events.push(SequenceEvent::Completed),
        }
    }
}

/// Helper: есть ли в списке событий вход в фазу
pub fn entered<P: PartialEq>(events: &[SequenceEvent<P>], phase: P) -> bool {
    events
        .iter()
        .any(|event| matches!(event, SequenceEvent::Entered(p) if *p == phase))
}

pub fn completed<P>(events: &[SequenceEvent<P>]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, SequenceEvent::Completed))
}

/// Часы для sequence в `Update`: delta по домену
#[derive(SystemParam)]
pub struct SequenceClock<'w> {
    virtual_time: Res<'w, Time<Virtual>>,
    real_time: Res<'w, Time<Real>>,
}

impl SequenceClock<'_> {
    pub fn delta(&self, domain: TimeDomain) -> f32 {
        match domain {
            TimeDomain::Simulation => self.virtual_time.delta_secs(),
            TimeDomain::Real => self.real_time.delta_secs(),
        }
    }

    pub fn real_elapsed(&self) -> f32 {
        self.real_time.elapsed_secs()
    }
}
