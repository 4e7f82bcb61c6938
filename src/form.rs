use crate::record::{
    PatientRecord, Region, Sex, Smoker, AGE_RANGE, BMI_RANGE, CHILDREN_RANGE,
};

/// A number input bounded to `[min, max]`.
///
/// Values can be stepped or typed; typed text is only applied on [`NumberInput::commit`],
/// where it is clamped like any other value.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberInput {
    pub label: &'static str,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    decimals: u32,
    buffer: Option<String>,
}

impl NumberInput {
    /// Creates a new `NumberInput`.
    ///
    /// # Arguments
    /// * `label` - The text shown next to the input.
    /// * `(min, max)` - The inclusive bounds.
    /// * `value` - The initial value, clamped into the bounds.
    /// * `step` - The increment applied by `increment`/`decrement`.
    /// * `decimals` - The precision kept; 0 makes an integer input.
    ///
    /// # Returns
    /// A new `NumberInput` instance.
    pub fn new(
        label: &'static str,
        (min, max): (f64, f64),
        value: f64,
        step: f64,
        decimals: u32,
    ) -> Self {
        let mut input = Self {
            label,
            value: min,
            min,
            max,
            step,
            decimals,
            buffer: None,
        };
        input.set(value);
        input
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Sets the value, clamped into the bounds and rounded to the input's precision.
    pub fn set(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }

        let scale = 10f64.powi(self.decimals as i32);
        let rounded = (value * scale).round() / scale;
        self.value = rounded.clamp(self.min, self.max);
    }

    pub fn increment(&mut self) {
        self.buffer = None;
        self.set(self.value + self.step);
    }

    pub fn decrement(&mut self) {
        self.buffer = None;
        self.set(self.value - self.step);
    }

    /// Types a character; only digits, and a single `.` for decimal inputs, are accepted.
    pub fn push_char(&mut self, c: char) -> bool {
        let buffer = self.buffer.get_or_insert_with(String::new);
        let accepted = c.is_ascii_digit() || (c == '.' && self.decimals > 0 && !buffer.contains('.'));

        if accepted {
            buffer.push(c);
        } else if buffer.is_empty() {
            self.buffer = None;
        }
        accepted
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.pop();
        }
    }

    /// Applies the typed text, if any. Text that is not a number leaves the value untouched.
    pub fn commit(&mut self) {
        let Some(buffer) = self.buffer.take() else {
            return;
        };

        if let Ok(value) = buffer.parse::<f64>() {
            self.set(value);
        }
    }

    pub fn is_editing(&self) -> bool {
        self.buffer.is_some()
    }

    /// Returns the text to show: the typed text while editing, the value otherwise.
    pub fn display(&self) -> String {
        match &self.buffer {
            Some(buffer) => buffer.clone(),
            None => format!("{:.*}", self.decimals as usize, self.value),
        }
    }
}

/// A choice among a fixed set of options.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectBox<T: Copy + 'static> {
    pub label: &'static str,
    options: &'static [T],
    selected: usize,
}

impl<T: Copy + 'static> SelectBox<T> {
    /// Creates a new `SelectBox` with the first option selected.
    pub fn new(label: &'static str, options: &'static [T]) -> Self {
        Self {
            label,
            options,
            selected: 0,
        }
    }

    pub fn value(&self) -> T {
        self.options[self.selected]
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.options.len();
    }

    pub fn prev(&mut self) {
        self.selected = (self.selected + self.options.len() - 1) % self.options.len();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Checkbox {
    pub label: &'static str,
    pub checked: bool,
}

impl Checkbox {
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}

/// The focusable rows of the patient form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    Sex,
    Bmi,
    Children,
    Smoker,
    Region,
    Predict,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Age,
        Field::Sex,
        Field::Bmi,
        Field::Children,
        Field::Smoker,
        Field::Region,
        Field::Predict,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[idx.saturating_sub(1)]
    }
}

/// The single-record input controls.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientForm {
    pub age: NumberInput,
    pub sex: SelectBox<Sex>,
    pub bmi: NumberInput,
    pub children: NumberInput,
    pub smoker: Checkbox,
    pub region: SelectBox<Region>,
}

impl Default for PatientForm {
    fn default() -> Self {
        Self {
            age: NumberInput::new(
                "Age",
                (f64::from(*AGE_RANGE.start()), f64::from(*AGE_RANGE.end())),
                30.0,
                1.0,
                0,
            ),
            sex: SelectBox::new("Sex", &Sex::ALL),
            bmi: NumberInput::new("BMI", (*BMI_RANGE.start(), *BMI_RANGE.end()), 25.0, 0.1, 2),
            children: NumberInput::new(
                "Number of Children",
                (
                    f64::from(*CHILDREN_RANGE.start()),
                    f64::from(*CHILDREN_RANGE.end()),
                ),
                0.0,
                1.0,
                0,
            ),
            smoker: Checkbox {
                label: "Smoker",
                checked: false,
            },
            region: SelectBox::new("Region", &Region::ALL),
        }
    }
}

impl PatientForm {
    /// Returns the number input behind `field`, if it is one.
    pub fn number_mut(&mut self, field: Field) -> Option<&mut NumberInput> {
        match field {
            Field::Age => Some(&mut self.age),
            Field::Bmi => Some(&mut self.bmi),
            Field::Children => Some(&mut self.children),
            _ => None,
        }
    }

    /// Moves the control behind `field` one step forward or backward.
    ///
    /// # Returns
    /// Whether a control changed.
    pub fn adjust(&mut self, field: Field, forward: bool) -> bool {
        if let Some(input) = self.number_mut(field) {
            if forward {
                input.increment();
            } else {
                input.decrement();
            }
            return true;
        }

        match field {
            Field::Sex if forward => self.sex.next(),
            Field::Sex => self.sex.prev(),
            Field::Region if forward => self.region.next(),
            Field::Region => self.region.prev(),
            Field::Smoker => self.smoker.toggle(),
            _ => return false,
        }
        true
    }

    /// Applies any typed text in the number inputs.
    pub fn commit(&mut self) {
        self.age.commit();
        self.bmi.commit();
        self.children.commit();
    }

    /// Produces the patient record described by the current control values.
    ///
    /// Uncommitted typed text is ignored.
    pub fn collect(&self) -> PatientRecord {
        PatientRecord {
            age: self.age.value().round() as u8,
            sex: self.sex.value(),
            bmi: self.bmi.value(),
            children: self.children.value().round() as u8,
            smoker: if self.smoker.checked {
                Smoker::Yes
            } else {
                Smoker::No
            },
            region: self.region.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_form() {
        let record = PatientForm::default().collect();
        assert_eq!(
            record,
            PatientRecord {
                age: 30,
                sex: Sex::Male,
                bmi: 25.0,
                children: 0,
                smoker: Smoker::No,
                region: Region::Northeast,
            }
        );
    }

    #[test]
    fn number_inputs_clamp_to_their_bounds() {
        let mut form = PatientForm::default();
        form.age.set(150.0);
        form.children.set(-3.0);
        form.bmi.set(4.2);

        let record = form.collect();
        assert_eq!(record.age, 100);
        assert_eq!(record.children, 0);
        assert_eq!(record.bmi, 10.0);

        for _ in 0..20 {
            form.children.increment();
        }
        assert_eq!(form.collect().children, 10);
    }

    #[test]
    fn stepping_keeps_decimal_precision() {
        let mut bmi = NumberInput::new("BMI", (10.0, 50.0), 25.0, 0.1, 2);
        for _ in 0..3 {
            bmi.increment();
        }
        assert_eq!(bmi.value(), 25.3);
        assert_eq!(bmi.display(), "25.30");
    }

    #[test]
    fn typed_values_apply_on_commit() {
        let mut form = PatientForm::default();
        form.age.backspace();
        assert!(form.age.push_char('4'));
        assert!(form.age.push_char('5'));
        assert!(!form.age.push_char('.'));
        assert_eq!(form.collect().age, 30);

        form.commit();
        assert_eq!(form.collect().age, 45);

        form.age.push_char('9');
        form.age.push_char('9');
        form.age.push_char('9');
        form.commit();
        assert_eq!(form.collect().age, 100);
    }

    #[test]
    fn collecting_is_idempotent() {
        let mut form = PatientForm::default();
        form.adjust(Field::Sex, true);
        form.adjust(Field::Smoker, true);
        form.adjust(Field::Region, false);
        form.adjust(Field::Bmi, true);

        let first = form.collect();
        let second = form.collect();
        assert_eq!(first, second);
        assert_eq!(first.sex, Sex::Female);
        assert_eq!(first.smoker, Smoker::Yes);
        assert_eq!(first.region, Region::Southwest);
    }

    #[test]
    fn focus_stops_at_the_ends() {
        assert_eq!(Field::Age.prev(), Field::Age);
        assert_eq!(Field::Predict.next(), Field::Predict);
        assert_eq!(Field::Smoker.next(), Field::Region);
    }
}
