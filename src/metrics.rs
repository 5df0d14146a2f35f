/// Words per minute over a fixed budget.
///
/// Assumes the whole budget elapsed; a late start is not credited back.
pub fn words_per_minute(correct_words: usize, time_budget_secs: u32) -> f64 {
    if time_budget_secs == 0 {
        return 0.0;
    }
    correct_words as f64 * (60.0 / time_budget_secs as f64)
}

/// Percentage of judged words that were correct, 0 when nothing was judged.
pub fn accuracy(correct_words: usize, total_judged: usize) -> f64 {
    if total_judged == 0 {
        return 0.0;
    }
    (correct_words as f64 / total_judged as f64) * 100.0
}

/// Final statistics shown once the clock runs out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Results {
    pub wpm: f64,
    pub accuracy: f64,
    pub correct_words: usize,
    pub incorrect_words: usize,
}

impl Results {
    pub fn tally(correct_words: usize, total_judged: usize, time_budget_secs: u32) -> Self {
        Self {
            wpm: words_per_minute(correct_words, time_budget_secs),
            accuracy: accuracy(correct_words, total_judged),
            correct_words,
            incorrect_words: total_judged.saturating_sub(correct_words),
        }
    }

    pub fn accuracy_display(&self) -> String {
        format!("{:.2}", self.accuracy)
    }

    /// Whole numbers print bare; budgets that don't divide a minute get two
    /// decimals.
    pub fn wpm_display(&self) -> String {
        if self.wpm.fract() == 0.0 {
            format!("{:.0}", self.wpm)
        } else {
            format!("{:.2}", self.wpm)
        }
    }
}
