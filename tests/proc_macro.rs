use {
    ::std::{
        fmt,
        sync::mpsc,
    },
    ::threaded_gen::prelude::*,
};

#[test]
fn unit_body ()
{
    #[generator(yield(u8))]
    fn countdown (mut remaining: u8)
    {
        while let Some(next) = remaining.checked_sub(1) {
            yield_!(remaining);
            remaining = next;
        }
    }

    let mut generator = countdown(3);
    assert_eq!(generator.pull().unwrap(), 3);
    assert_eq!(generator.pull().unwrap(), 2);
    assert_eq!(generator.pull().unwrap(), 1);
    assert!(matches!(generator.pull(), Err(GeneratorError::Exhausted)));
}

#[test]
fn early_return_in_unit_body ()
{
    #[generator(u8)]
    fn first_two (values: Vec<u8>)
    {
        for (i, value) in values.into_iter().enumerate() {
            if i == 2 {
                return;
            }
            yield_!(value);
        }
    }

    assert_eq!(
        first_two(vec![4, 5, 6, 7]).collect::<Result<Vec<_>, _>>().unwrap(),
        [4, 5],
    );
}

#[derive(Debug)]
struct Negative(i32);

impl fmt::Display for Negative {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        write!(f, "negative value: {}", self.0)
    }
}

impl ::std::error::Error for Negative {}

#[test]
fn result_body ()
{
    #[generator(yield(u32))]
    fn checked (values: Vec<i32>)
      -> Result<(), BoxError>
    {
        for value in values {
            if value < 0 {
                return Err(Negative(value).into());
            }
            yield_!(value as u32);
        }
        Ok(())
    }

    let mut generator = checked(vec![1, 2, -3, 4]);
    assert_eq!(generator.pull().unwrap(), 1);
    assert_eq!(generator.pull().unwrap(), 2);
    let err = generator.pull().unwrap_err();
    assert_eq!(err.downcast_cause::<Negative>().unwrap().0, -3);
    assert!(matches!(generator.pull(), Err(GeneratorError::Terminated)));
}

#[test]
fn cancelled_unit_body_returns ()
{
    #[generator(yield(u64))]
    fn naturals (done: mpsc::Sender<u64>)
    {
        let mut current = 0;
        loop {
            yield_!(current);
            current += 1;
            // Only reached once the yield went through.
            let _ = done.send(current);
        }
    }

    let (tx, rx) = mpsc::channel();
    let mut generator = naturals(tx);
    assert_eq!(generator.pull().unwrap(), 0);
    assert_eq!(generator.pull().unwrap(), 1);
    drop(generator);
    // The producer body returns, dropping the sender.
    let seen: Vec<u64> = rx.iter().collect();
    assert_eq!(seen, [1, 2]);
}

mod adaptors {
    use super::*;

    #[generator(yield(T))]
    fn filter<T : Send + 'static> (
        mut predicate: impl FnMut(&T) -> bool + Send + 'static,
        iterable: impl IntoIterator<Item = T> + Send + 'static,
    )
    {
        for element in iterable {
            if predicate(&element) {
                yield_!(element);
            }
        }
    }

    #[generator(yield(U))]
    fn map<T : Send + 'static, U : Send + 'static> (
        mut f: impl FnMut(T) -> U + Send + 'static,
        iterable: impl IntoIterator<Item = T> + Send + 'static,
    )
    {
        for element in iterable {
            yield_!(f(element));
        }
    }

    #[generator(yield(u8))]
    fn range (start: u8, end: u8)
    {
        let mut current = start;
        while current < end {
            yield_!(current);
            current += 1;
        }
    }

    #[test]
    fn filter_range ()
    {
        let iterator = range(2, 7).map(Result::unwrap);
        let iterator = filter(|x| x % 2 == 0, iterator);
        assert_eq!(
            iterator.collect::<Result<Vec<_>, _>>().unwrap(),
            [2, 4, 6],
        );
    }

    #[test]
    fn filter_map_range ()
    {
        let iterator = range(2, 7).map(Result::unwrap);
        let iterator = filter(|x| x % 2 == 0, iterator).map(Result::unwrap);
        let iterator = map(|x: u8| x * x, iterator);
        assert_eq!(
            iterator.collect::<Result<Vec<_>, _>>().unwrap(),
            Vec::from_iter([4, 16, 36]),
        );
    }
}

mod docs {
    macro_rules! test_include {(
        $($ident:ident),* $(,)?
    ) => (
        $(
            mod $ident {
                #[test] fn test () { main() }
                include! {
                    concat!(
                        "../src/doc_examples/",
                        stringify!($ident),
                        ".rs",
                    )
                }
            }

        )*
    )}
    test_include! {
        generator,
        generator_desugared,
    }
}
