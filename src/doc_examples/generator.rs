fn main ()
{
    use ::threaded_gen::prelude::*;

    #[derive(Debug)]
    struct TooBig(u64);

    impl ::core::fmt::Display for TooBig {
        fn fmt (self: &'_ Self, f: &'_ mut ::core::fmt::Formatter<'_>)
          -> ::core::fmt::Result
        {
            write!(f, "{} is too big", self.0)
        }
    }

    impl ::std::error::Error for TooBig {}

    #[generator(yield(u64))]
    fn fibonacci (limit: u64)
      -> Result<(), BoxError>
    {
        yield_!(0);
        let (mut i, mut j) = (0, 1);
        loop {
            if j > limit {
                return Err(TooBig(j).into());
            }
            yield_!(j);
            let next = i + j;
            i = j;
            j = next;
        }
    }

    let mut generator = fibonacci(100);
    let mut seen = vec![];
    let err = loop {
        match generator.resume() {
            | GeneratorState::Yielded(value) => seen.push(value),
            | GeneratorState::Returned(ret) => break ret.unwrap_err(),
        }
    };
    assert_eq!(seen, [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89]);
    assert_eq!(err.downcast_cause::<TooBig>().unwrap().0, 144);
    assert!(matches!(generator.pull(), Err(GeneratorError::Terminated)));
}
