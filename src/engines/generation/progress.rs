use super::evolution_engine::ProgressCallback;

/// Reports progress through the `log` facade
pub struct LogProgressCallback {
    /// Log a full line every `interval` generations; others go to debug
    pub interval: usize,
}

impl Default for LogProgressCallback {
    fn default() -> Self {
        Self { interval: 10 }
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::trace!("Generation {} starting...", generation + 1);
    }

    fn on_population_evaluated(&mut self, generation: usize, rejected: usize, total: usize) {
        if rejected > 0 {
            log::debug!(
                "Generation {}: {}/{} programs rejected (NaN)",
                generation + 1,
                rejected,
                total
            );
        }
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, hof_size: usize) {
        if self.interval > 0 && (generation + 1) % self.interval == 0 {
            log::info!(
                "Generation {} complete. Best fitness: {:.4}, Hall of Fame size: {}",
                generation + 1, best_fitness, hof_size
            );
        } else {
            log::debug!("Generation {} best fitness: {:.4}", generation + 1, best_fitness);
        }
    }
}

// For handing progress to another thread
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    PopulationEvaluated { generation: usize, rejected: usize, total: usize },
    GenerationComplete { generation: usize, best_fitness: f64, hof_size: usize },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_population_evaluated(&mut self, generation: usize, rejected: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::PopulationEvaluated {
            generation,
            rejected,
            total,
        });
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, hof_size: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
            hof_size,
        });
    }
}
